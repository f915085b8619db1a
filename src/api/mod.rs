//! HTTP surface of the API.
//!
//! Routes are mounted under `/api`; the OpenAPI document is served next to
//! Swagger UI. Handlers only translate HTTP into service calls, and the
//! middleware layer owns bearer auth, roles, rate limits and headers.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
