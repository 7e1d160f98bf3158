//! Team domain module
//!
//! Teams own players and support messages. Teams are imported in bulk from
//! CSV and edited one at a time; players are only read through this module.

mod entity;
mod repository;
mod validation;

pub use entity::{NewTeam, Team, TeamId, TeamPatch, TeamStats, TeamSummary};
pub use repository::TeamRepository;
pub use validation::{
    require_field, validate_csv_filename, TeamValidationError, DESCRIPTION_COLUMN, NAME_COLUMN,
};

#[cfg(test)]
pub use repository::MockTeamRepository;
