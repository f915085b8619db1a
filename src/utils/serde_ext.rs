//! Lenient deserializers for form-style payloads.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Truthiness of a form value: booleans as-is, strings like `sim`/`on`/`1`,
/// non-zero numbers; everything else follows JavaScript-style truthiness.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "1" | "on" | "yes" | "sim" | "matriculado"
        ),
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A query-string flag: absent stays `None`, present values go through
/// [`truthy`].
pub fn query_flag(value: Option<&str>) -> Option<bool> {
    value.map(|v| truthy(&Value::String(v.to_string())))
}

/// For `Option<bool>` fields with `#[serde(default)]`: absent stays `None`,
/// any present value (including `null`) is coerced through [`truthy`].
pub fn flexible_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(truthy(&value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "flexible_bool")]
        ativo: Option<bool>,
    }

    fn parse(v: Value) -> Option<bool> {
        serde_json::from_value::<Form>(v).unwrap().ativo
    }

    #[test]
    fn test_absent_is_none() {
        assert_eq!(parse(json!({})), None);
    }

    #[test]
    fn test_string_values() {
        assert_eq!(parse(json!({"ativo": "Sim"})), Some(true));
        assert_eq!(parse(json!({"ativo": " matriculado "})), Some(true));
        assert_eq!(parse(json!({"ativo": "1"})), Some(true));
        assert_eq!(parse(json!({"ativo": "false"})), Some(false));
        assert_eq!(parse(json!({"ativo": "inativo"})), Some(false));
    }

    #[test]
    fn test_query_flag() {
        assert_eq!(query_flag(None), None);
        assert_eq!(query_flag(Some("true")), Some(true));
        assert_eq!(query_flag(Some("0")), Some(false));
    }

    #[test]
    fn test_non_string_values() {
        assert_eq!(parse(json!({"ativo": true})), Some(true));
        assert_eq!(parse(json!({"ativo": 0})), Some(false));
        assert_eq!(parse(json!({"ativo": null})), Some(false));
    }
}
