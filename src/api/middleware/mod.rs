//! API middleware components

pub mod auth;
pub mod logging;

pub use auth::{extract_jwt_token, Caller, RequireAdmin, RequireViewer};
pub use logging::logging_middleware;
