//! Application route configuration.

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    aluno_routes, auth_routes, curso_routes, dashboard_routes, health, professor_routes,
    session_routes,
};
use super::middleware::{
    auth_middleware, optional_auth_middleware, rate_limit_auth_middleware, rate_limit_middleware,
    security_headers,
};
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::{Config, MAX_BODY_BYTES};

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let bearer = || middleware::from_fn_with_state(state.clone(), auth_middleware);
    let general_limit = || middleware::from_fn_with_state(state.clone(), rate_limit_middleware);

    let auth = auth_routes()
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_auth_middleware,
        ))
        .merge(session_routes().route_layer(bearer()));

    let api = Router::new()
        .route("/health", get(health))
        .nest("/auth", auth)
        .nest(
            "/alunos",
            aluno_routes()
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    optional_auth_middleware,
                ))
                .route_layer(general_limit()),
        )
        .nest(
            "/professores",
            professor_routes()
                .route_layer(bearer())
                .route_layer(general_limit()),
        )
        .nest(
            "/cursos",
            curso_routes()
                .route_layer(bearer())
                .route_layer(general_limit()),
        )
        .nest(
            "/dashboard",
            dashboard_routes()
                .route_layer(bearer())
                .route_layer(general_limit()),
        );

    let router = Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http());

    security_headers(router).with_state(state)
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Rota não encontrada" })),
    )
}

/// Permissive in development; production only allows the configured origins.
fn cors_layer(config: &Config) -> CorsLayer {
    if config.is_development() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS is empty: cross-origin requests will be refused");
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers(Any)
}
