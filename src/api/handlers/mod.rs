//! HTTP request handlers.

pub mod aluno_handler;
pub mod auth_handler;
pub mod curso_handler;
pub mod dashboard_handler;
pub mod health_handler;
pub mod professor_handler;

pub use aluno_handler::aluno_routes;
pub use auth_handler::{auth_routes, session_routes};
pub use curso_handler::curso_routes;
pub use dashboard_handler::dashboard_routes;
pub use health_handler::health;
pub use professor_handler::professor_routes;
