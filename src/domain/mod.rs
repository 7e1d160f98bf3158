//! Domain layer - Entities, repository traits and business rules

pub mod cache;
pub mod error;
pub mod player;
pub mod role;
pub mod team;

pub use error::DomainError;
pub use player::{Player, PlayerId, PlayerQuery, PlayerRepository, PlayerSearch};
pub use role::Role;
pub use team::{NewTeam, Team, TeamId, TeamPatch, TeamRepository, TeamStats, TeamSummary};
