//! Staff user entity and role enumeration.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{CARGO_ADMIN, CARGO_COORDENADOR, CARGO_PROFESSOR, CARGO_VOLUNTARIO};

/// Staff role (cargo)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Cargo {
    Admin,
    Coordenador,
    Professor,
    #[default]
    Voluntario,
}

impl_string_enum!(Cargo {
    Admin => CARGO_ADMIN,
    Coordenador => CARGO_COORDENADOR,
    Professor => CARGO_PROFESSOR,
    Voluntario => CARGO_VOLUNTARIO,
});

impl Cargo {
    /// Roles allowed to manage records (delete, reactivate, professor writes).
    pub const MANAGERS: &'static [Cargo] = &[Cargo::Admin, Cargo::Coordenador];

    pub fn is_elevated(&self) -> bool {
        Self::MANAGERS.contains(self)
    }
}

/// User domain entity
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub nome: String,
    pub email: String,
    pub senha_hash: String,
    pub cargo: Cargo,
    pub ativo: bool,
    pub ultimo_login: Option<DateTime<Utc>>,
    pub avatar: Option<String>,
    pub telefone: Option<String>,
    pub data_nascimento: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data needed to insert a user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub nome: String,
    pub email: String,
    pub senha_hash: String,
    pub cargo: Cargo,
    pub telefone: Option<String>,
    pub data_nascimento: Option<NaiveDate>,
}

/// User as exposed to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicUser {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Maria Souza")]
    pub nome: String,
    #[schema(example = "maria@ong.org")]
    pub email: String,
    pub cargo: Cargo,
    pub avatar: Option<String>,
    /// Only present on token verification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ultimo_login: Option<DateTime<Utc>>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            nome: user.nome.clone(),
            email: user.email.clone(),
            cargo: user.cargo,
            avatar: user.avatar.clone(),
            ultimo_login: None,
        }
    }
}

impl PublicUser {
    pub fn with_last_login(mut self, ultimo_login: Option<DateTime<Utc>>) -> Self {
        self.ultimo_login = ultimo_login;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cargo_parsing() {
        assert_eq!("admin".parse::<Cargo>(), Ok(Cargo::Admin));
        assert_eq!("voluntario".parse::<Cargo>(), Ok(Cargo::Voluntario));
        assert!("root".parse::<Cargo>().is_err());
        assert_eq!(Cargo::default(), Cargo::Voluntario);
    }

    #[test]
    fn test_elevated_cargos() {
        assert!(Cargo::Admin.is_elevated());
        assert!(Cargo::Coordenador.is_elevated());
        assert!(!Cargo::Professor.is_elevated());
        assert!(!Cargo::Voluntario.is_elevated());
    }

    #[test]
    fn test_serde_matches_database_strings() {
        for cargo in Cargo::ALL {
            let json = serde_json::to_string(cargo).unwrap();
            assert_eq!(json, format!("\"{}\"", cargo.as_str()));
        }
    }
}
