//! API middleware.

mod auth;
mod rate_limit;
mod security_headers;

pub use auth::{
    auth_middleware, optional_auth_middleware, require_manager, require_role, CurrentUser,
};
pub use rate_limit::{rate_limit_auth_middleware, rate_limit_middleware};
pub use security_headers::security_headers;
