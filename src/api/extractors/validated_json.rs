//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::domain::Normalize;
use crate::errors::{AppError, FieldError};

/// Validated JSON extractor that automatically validates requests.
///
/// Top-level blank strings are treated as absent before deserializing, so an
/// emptied form field clears an optional value instead of failing its format
/// check. The payload is normalized before validation, so rules apply to
/// the value that gets stored.
///
/// # Example
///
/// ```rust,ignore
/// use ong_admin_api::api::extractors::ValidatedJson;
/// use ong_admin_api::domain::AlunoForm;
///
/// async fn create(ValidatedJson(form): ValidatedJson<AlunoForm>) {
///     // form is already normalized and validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Normalize,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::field("body", e.body_text()))?;

        strip_blank_strings(&mut body);

        let value = serde_json::from_value::<T>(body)
            .map_err(|e| AppError::field("body", e.to_string()))?
            .normalized();

        value
            .validate()
            .map_err(|e| AppError::InvalidFields(validation_fields(&e)))?;

        Ok(ValidatedJson(value))
    }
}

fn strip_blank_strings(body: &mut Value) {
    if let Value::Object(map) = body {
        map.retain(|_, v| !matches!(v, Value::String(s) if s.trim().is_empty()));
    }
}

/// Flatten validator errors into `{field, message}` pairs, sorted by field.
pub fn validation_fields(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} inválido", field));
                FieldError::new(field.to_string(), message)
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, Validate)]
    struct Form {
        #[validate(length(min = 2, message = "Nome muito curto"))]
        nome: String,
        #[validate(email(message = "Email inválido"))]
        email: Option<String>,
    }

    impl Normalize for Form {
        fn normalized(self) -> Self {
            Self {
                nome: self.nome.trim().to_string(),
                email: self.email.map(|e| e.trim().to_lowercase()),
            }
        }
    }

    async fn extract(body: Value) -> Result<Form, AppError> {
        let request = Request::builder()
            .header("content-type", "application/json")
            .body(axum::body::Body::from(body.to_string()))
            .unwrap();
        ValidatedJson::<Form>::from_request(request, &())
            .await
            .map(|ValidatedJson(form)| form)
    }

    #[test]
    fn test_strip_blank_strings() {
        let mut body = json!({"nome": "Ana", "email": "  ", "idade": 3});
        strip_blank_strings(&mut body);
        assert_eq!(body, json!({"nome": "Ana", "idade": 3}));
    }

    #[test]
    fn test_validation_fields_carry_messages() {
        let form: Form = serde_json::from_value(json!({"nome": "A", "email": "x"})).unwrap();
        let fields = validation_fields(&form.validate().unwrap_err());

        assert_eq!(
            fields,
            vec![
                FieldError::new("email", "Email inválido"),
                FieldError::new("nome", "Nome muito curto"),
            ]
        );
    }

    #[tokio::test]
    async fn test_length_rules_apply_after_trimming() {
        let err = extract(json!({"nome": " A "})).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidFields(ref f) if f[0].field == "nome"));
    }

    #[tokio::test]
    async fn test_padded_email_is_accepted_normalized() {
        let form = extract(json!({"nome": " Ana ", "email": " Ana@ONG.org "}))
            .await
            .unwrap();
        assert_eq!(form.nome, "Ana");
        assert_eq!(form.email.as_deref(), Some("ana@ong.org"));
    }
}
