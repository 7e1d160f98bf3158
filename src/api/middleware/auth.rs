//! Role-gated authentication extractors using JWT bearer tokens

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::Role;

/// Authenticated caller taken from a validated token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub subject: String,
    pub role: Role,
}

/// Extractor that requires the `admin` role
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Caller);

/// Extractor that requires the `viewer` role; admins pass as well
#[derive(Debug, Clone)]
pub struct RequireViewer(pub Caller);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(&parts.headers, state, Role::Admin).map(RequireAdmin)
    }
}

impl FromRequestParts<AppState> for RequireViewer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(&parts.headers, state, Role::Viewer).map(RequireViewer)
    }
}

/// Validate the bearer token and check it grants the required role
fn authorize(headers: &HeaderMap, state: &AppState, required: Role) -> Result<Caller, ApiError> {
    let token = extract_jwt_token(headers)?;

    let claims = state
        .jwt_service
        .validate(&token)
        .map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))?;

    if !claims.role.satisfies(required) {
        debug!(subject = %claims.sub, role = %claims.role, required = %required, "Role check failed");
        return Err(
            ApiError::forbidden(format!("The '{}' role is required", required))
                .with_code("insufficient_role"),
        );
    }

    debug!(subject = %claims.sub, role = %claims.role, "Caller authorized");

    Ok(Caller {
        subject: claims.sub,
        role: claims.role,
    })
}

/// Extract JWT token from Authorization header
pub fn extract_jwt_token(headers: &HeaderMap) -> Result<String, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::unauthorized("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    Err(ApiError::unauthorized(
        "Authentication required. Provide JWT token via 'Authorization: Bearer <token>' header",
    ))
}
