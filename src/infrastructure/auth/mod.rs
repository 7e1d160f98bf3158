//! Authentication infrastructure module
//!
//! Bearer tokens are HS256 JWTs carrying the caller's role.

mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtGenerator, JwtService};
