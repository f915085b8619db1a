//! JWT authentication middleware and role checks.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::{Cargo, User};
use crate::errors::AppError;
use crate::services::Claims;

/// Authenticated user resolved from the bearer token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub user: User,
    pub claims: Claims,
}

impl CurrentUser {
    pub fn id(&self) -> i32 {
        self.user.id
    }

    pub fn cargo(&self) -> Cargo {
        self.user.cargo
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// `Some(token)` when an Authorization header is present; a header without
/// the Bearer prefix is an error.
fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AppError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(Some)
        .ok_or(AppError::Unauthorized)
}

async fn authenticate(state: &AppState, request: &mut Request, token: &str) -> Result<(), AppError> {
    let (user, claims) = state.auth().authenticate(token).await?;
    request.extensions_mut().insert(CurrentUser { user, claims });
    Ok(())
}

/// JWT authentication middleware.
///
/// Resolves the bearer token to an active user and injects `CurrentUser`
/// into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?
        .ok_or(AppError::Unauthorized)?
        .to_string();

    authenticate(&state, &mut request, &token).await?;

    Ok(next.run(request).await)
}

/// Like `auth_middleware`, but anonymous requests pass through in
/// development. A token that is sent is always verified.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?.map(str::to_string);
    match token {
        Some(token) => authenticate(&state, &mut request, &token).await?,
        None if state.config.is_development() => {
            tracing::debug!("Anonymous request allowed in development");
        }
        None => return Err(AppError::Unauthorized),
    }

    Ok(next.run(request).await)
}

/// 403 unless the user holds one of `allowed`.
pub fn require_role(user: &CurrentUser, allowed: &[Cargo]) -> Result<(), AppError> {
    if allowed.contains(&user.cargo()) {
        Ok(())
    } else {
        tracing::warn!(user_id = user.id(), cargo = user.cargo().as_str(), "Role check failed");
        Err(AppError::Forbidden)
    }
}

/// Shorthand for the admin/coordenador check used by write routes.
pub fn require_manager(user: &CurrentUser) -> Result<(), AppError> {
    require_role(user, Cargo::MANAGERS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::Utc;

    fn current(cargo: Cargo) -> CurrentUser {
        let now = Utc::now();
        CurrentUser {
            user: User {
                id: 1,
                nome: "Maria".into(),
                email: "maria@ong.org".into(),
                senha_hash: String::new(),
                cargo,
                ativo: true,
                ultimo_login: None,
                avatar: None,
                telefone: None,
                data_nascimento: None,
                created_at: now,
                updated_at: now,
            },
            claims: Claims {
                sub: 1,
                email: "maria@ong.org".into(),
                cargo: cargo.as_str().into(),
                jti: "jti".into(),
                iat: 0,
                exp: 0,
            },
        }
    }

    #[test]
    fn test_require_role() {
        assert!(require_manager(&current(Cargo::Admin)).is_ok());
        assert!(require_manager(&current(Cargo::Coordenador)).is_ok());
        assert!(matches!(
            require_manager(&current(Cargo::Voluntario)),
            Err(AppError::Forbidden)
        ));
        assert!(require_role(&current(Cargo::Professor), &[Cargo::Professor]).is_ok());
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers).unwrap(), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers).unwrap(), Some("abc.def"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        assert!(bearer_token(&headers).is_err());
    }
}
