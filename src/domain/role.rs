//! Access roles carried by authenticated callers

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Role granted to a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access, including imports and mutations
    Admin,
    /// Read-only access
    Viewer,
}

impl Role {
    /// Check if this role satisfies an endpoint's required role
    pub fn satisfies(&self, required: Role) -> bool {
        match (self, required) {
            (Self::Admin, _) => true,
            (Self::Viewer, Self::Viewer) => true,
            (Self::Viewer, Self::Admin) => false,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "viewer" => Ok(Self::Viewer),
            other => Err(DomainError::bad_input(format!(
                "Unknown role: {}. Valid roles: admin, viewer",
                other
            ))),
        }
    }
}
