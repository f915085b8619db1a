use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Envelope for mutations: `{success, message, data}`.
///
/// Reads (`GET`) return the resource itself; writes wrap it here.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Deletions carry no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// `{message}` only, used by logout
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 201 Created with a message and the created resource
pub struct Created<T: Serialize>(pub T, pub &'static str);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::CREATED,
            Json(ApiResponse::with_message(self.0, self.1)),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deletion_envelope_has_no_data() {
        let json = serde_json::to_value(ApiResponse::message("Aluno removido com sucesso")).unwrap();
        assert_eq!(
            json,
            json!({"success": true, "message": "Aluno removido com sucesso"})
        );
    }

    #[test]
    fn test_created_status() {
        let response = Created(json!({"id": 1}), "Curso cadastrado com sucesso").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
