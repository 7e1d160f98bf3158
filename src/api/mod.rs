//! API layer - HTTP endpoints and middleware

pub mod health;
pub mod middleware;
pub mod roster;
pub mod router;
pub mod state;
pub mod types;

pub use middleware::{Caller, RequireAdmin, RequireViewer};
pub use router::create_router_with_state;
pub use state::{AppState, TeamServiceTrait};
