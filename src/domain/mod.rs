//! Domain layer - Core business entities and logic
//!
//! Entities, request forms and value objects for the people and courses the
//! ONG manages. Free of infrastructure concerns apart from serde/validation
//! derives.

/// Implements `as_str`, `FromStr`, `Display` and `ALL` for a fieldless enum
/// whose variants map to fixed strings stored in the database.
macro_rules! impl_string_enum {
    ($name:ident { $($variant:ident => $value:expr),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(v if v == $value => Ok($name::$variant),)+
                    other => Err(format!("valor inválido: {}", other)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

pub mod aluno;
pub mod curso;
pub mod dashboard;
pub mod password;
pub mod professor;
pub mod sexo;
pub mod usuario;

pub use aluno::{
    Aluno, AlunoEstatisticas, AlunoFilter, AlunoForm, AlunoListQuery, AlunoResponse,
    AlunosDaTurma, TurmaCount,
};
pub use curso::{
    Categoria, Curso, CursoFilter, CursoForm, CursoListQuery, CursoStatus, DiaSemana, Nivel,
};
pub use dashboard::{
    Aniversariante, CrescimentoMensal, DashboardResumo, DashboardStats, FaixasEtarias,
    UltimoAluno,
};
pub use password::Password;
pub use professor::{
    FormacaoCount, Professor, ProfessorEstatisticas, ProfessorFilter, ProfessorForm,
    ProfessorListQuery, ProfessorStatus,
};
pub use sexo::Sexo;
pub use usuario::{Cargo, NewUser, PublicUser, User};

/// Canonical form of request input: trimmed text, lowercase emails,
/// formatted documents.
///
/// The JSON extractor applies it before validation, so length and format
/// rules see the stored value. Implementations must be idempotent.
pub trait Normalize: Sized {
    fn normalized(self) -> Self;
}

/// Trim a value, mapping blank strings to `None`.
pub(crate) fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
