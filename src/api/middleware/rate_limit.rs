//! Rate limiting middleware using Redis cache.
//!
//! Active only in production with Redis configured; otherwise requests pass
//! straight through.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::net::SocketAddr;

use crate::api::AppState;
use crate::config::{
    RATE_LIMIT_AUTH_REQUESTS, RATE_LIMIT_AUTH_WINDOW_SECONDS, RATE_LIMIT_REQUESTS,
    RATE_LIMIT_WINDOW_SECONDS,
};

/// Rate limit error response
#[derive(Debug)]
pub struct RateLimitError {
    pub retry_after: u64,
}

impl IntoResponse for RateLimitError {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert("Retry-After", HeaderValue::from(self.retry_after));
        headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("0"));

        (
            StatusCode::TOO_MANY_REQUESTS,
            headers,
            Json(json!({
                "error": "Muitas requisições. Tente novamente mais tarde.",
                "code": "RATE_LIMITED",
            })),
        )
            .into_response()
    }
}

/// Extract client identifier for rate limiting.
///
/// The peer address is used unless `trust_proxy` is set. Behind a trusted
/// proxy the last X-Forwarded-For entry is the address that proxy saw,
/// earlier entries are client-supplied.
fn get_client_identifier(request: &Request, trust_proxy: bool) -> String {
    if trust_proxy {
        if let Some(ip) = forwarded_client(request.headers()) {
            return ip;
        }
    }

    if let Some(connect_info) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return connect_info.0.ip().to_string();
    }

    "unknown".to_string()
}

fn forwarded_client(headers: &HeaderMap) -> Option<String> {
    let header = |name: &str| headers.get(name).and_then(|h| h.to_str().ok());

    header("X-Forwarded-For")
        .and_then(|forwarded| forwarded.rsplit(',').map(str::trim).find(|ip| !ip.is_empty()))
        .or_else(|| header("X-Real-IP").map(str::trim).filter(|ip| !ip.is_empty()))
        .map(String::from)
}

async fn limit(
    state: &AppState,
    request: Request,
    next: Next,
    scope: &str,
    max_requests: u64,
    window_seconds: u64,
) -> Result<Response, RateLimitError> {
    let cache = match &state.cache {
        Some(cache) if state.config.is_production() => cache,
        _ => return Ok(next.run(request).await),
    };

    let client_id = get_client_identifier(&request, state.config.trust_proxy);
    let key = format!("{}:{}", scope, client_id);

    let status = match cache.check_rate_limit(&key, max_requests, window_seconds).await {
        Ok(status) => status,
        Err(e) => {
            // Fail closed so an unreachable Redis cannot disable the limiter.
            tracing::error!(error = %e, scope, "Rate limit check failed - denying request");
            return Err(RateLimitError {
                retry_after: window_seconds,
            });
        }
    };

    if !status.allowed {
        tracing::warn!(client = %client_id, count = status.count, scope, "Rate limit exceeded");
        return Err(RateLimitError {
            retry_after: status.reset_in,
        });
    }

    let mut response = next.run(request).await;

    let remaining = max_requests.saturating_sub(status.count);
    let headers = response.headers_mut();
    headers.insert("X-RateLimit-Limit", HeaderValue::from(max_requests));
    headers.insert("X-RateLimit-Remaining", HeaderValue::from(remaining));

    Ok(response)
}

/// General rate limiting middleware.
/// Limits requests to RATE_LIMIT_REQUESTS per RATE_LIMIT_WINDOW_SECONDS.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    limit(
        &state,
        request,
        next,
        "general",
        RATE_LIMIT_REQUESTS,
        RATE_LIMIT_WINDOW_SECONDS,
    )
    .await
}

/// Stricter rate limiting for authentication endpoints.
/// Limits requests to RATE_LIMIT_AUTH_REQUESTS per RATE_LIMIT_AUTH_WINDOW_SECONDS.
pub async fn rate_limit_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    limit(
        &state,
        request,
        next,
        "auth",
        RATE_LIMIT_AUTH_REQUESTS,
        RATE_LIMIT_AUTH_WINDOW_SECONDS,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_rate_limit_error_response() {
        let response = RateLimitError { retry_after: 60 }.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()["Retry-After"], "60");
    }

    fn request(forwarded_for: &str) -> Request {
        let mut request = Request::builder()
            .header("X-Forwarded-For", forwarded_for)
            .header("X-Real-IP", "10.0.0.9")
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 7], 40000))));
        request
    }

    #[test]
    fn test_client_identifier_ignores_headers_without_proxy() {
        let first = request("1.1.1.1");
        let second = request("2.2.2.2");
        assert_eq!(get_client_identifier(&first, false), "192.168.1.7");
        assert_eq!(get_client_identifier(&second, false), "192.168.1.7");

        let bare = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(get_client_identifier(&bare, false), "unknown");
    }

    #[test]
    fn test_client_identifier_behind_proxy_uses_last_hop() {
        let spoofed = request("6.6.6.6, 10.0.0.1");
        assert_eq!(get_client_identifier(&spoofed, true), "10.0.0.1");

        let mut no_forwarded = request("");
        no_forwarded.headers_mut().remove("X-Forwarded-For");
        assert_eq!(get_client_identifier(&no_forwarded, true), "10.0.0.9");
    }
}
