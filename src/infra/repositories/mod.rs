//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod aluno_repository;
mod curso_repository;
pub(crate) mod entities;
mod professor_repository;
mod user_repository;

pub use aluno_repository::{AlunoRepository, AlunoStore};
pub use curso_repository::{CursoRepository, CursoStore};
pub use professor_repository::{ProfessorRepository, ProfessorStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use aluno_repository::MockAlunoRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use curso_repository::MockCursoRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use professor_repository::MockProfessorRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
