//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and repositories (SeaORM)
//! - Redis cache for rate limiting and token revocation
//! - Unit of Work exposing the repositories to services

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::{Cache, RateLimitStatus};
pub use db::{Database, Migrator};
pub use repositories::{
    AlunoRepository, AlunoStore, CursoRepository, CursoStore, ProfessorRepository,
    ProfessorStore, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockAlunoRepository, MockCursoRepository, MockProfessorRepository, MockUserRepository,
};
