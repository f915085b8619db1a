//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! Enumerations are stored as their string values.

pub mod aluno;
pub mod curso;
pub mod professor;
pub mod usuario;
