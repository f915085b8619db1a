use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sex as recorded on enrollment forms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Sexo {
    M,
    F,
    #[default]
    Outro,
}

impl_string_enum!(Sexo {
    M => "M",
    F => "F",
    Outro => "Outro",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_with_database_strings() {
        for sexo in Sexo::ALL {
            assert_eq!(sexo.as_str().parse::<Sexo>(), Ok(*sexo));
        }
        assert!("m".parse::<Sexo>().is_err());
    }

    #[test]
    fn test_serde_uses_database_strings() {
        assert_eq!(serde_json::to_string(&Sexo::Outro).unwrap(), "\"Outro\"");
        assert!(serde_json::from_str::<Sexo>("\"X\"").is_err());
    }
}
