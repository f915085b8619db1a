//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion and reach repositories through the Unit of Work.

mod aluno_service;
mod auth_service;
pub mod container;
mod curso_service;
mod dashboard_service;
mod professor_service;

#[cfg(test)]
pub(crate) mod test_support;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use aluno_service::{AlunoManager, AlunoService};
pub use auth_service::{AuthResponse, AuthService, Authenticator, Claims, Registration};
pub use curso_service::{parse_categoria, parse_curso_status, CursoManager, CursoService};
pub use dashboard_service::{DashboardManager, DashboardService};
pub use professor_service::{parse_status, ProfessorManager, ProfessorService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
