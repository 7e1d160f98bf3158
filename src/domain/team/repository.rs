//! Team repository trait

use async_trait::async_trait;

use super::entity::{NewTeam, Team, TeamId, TeamStats, TeamSummary};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for team persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Get a team by ID
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError>;

    /// List every team as `{id, name}`, ordered by id
    async fn list_summaries(&self) -> Result<Vec<TeamSummary>, DomainError>;

    /// Insert all teams in one batch, returning them with assigned ids
    async fn create_many(&self, teams: Vec<NewTeam>) -> Result<Vec<Team>, DomainError>;

    /// Persist the name and description of an existing team
    async fn update(&self, team: &Team) -> Result<Team, DomainError>;

    /// Delete a team by ID, returning whether a row was removed
    async fn delete(&self, id: TeamId) -> Result<bool, DomainError>;

    /// Per-team distinct player and support message counts, ordered by id
    async fn stats(&self) -> Result<Vec<TeamStats>, DomainError>;

    /// Verify the backing store is reachable
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
