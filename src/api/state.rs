//! Application state for shared services

use std::sync::Arc;

use crate::domain::cache::Cache;
use crate::domain::{
    DomainError, Player, PlayerQuery, PlayerRepository, Team, TeamId, TeamPatch, TeamRepository,
    TeamStats, TeamSummary,
};
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::team::TeamService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub team_service: Arc<dyn TeamServiceTrait>,
    pub jwt_service: Arc<dyn JwtGenerator>,
    pub cache: Arc<dyn Cache>,
}

impl AppState {
    pub fn new(
        team_service: Arc<dyn TeamServiceTrait>,
        jwt_service: Arc<dyn JwtGenerator>,
        cache: Arc<dyn Cache>,
    ) -> Self {
        Self {
            team_service,
            jwt_service,
            cache,
        }
    }
}

/// Trait for team service operations
#[async_trait::async_trait]
pub trait TeamServiceTrait: Send + Sync {
    async fn list_teams(&self) -> Result<Vec<TeamSummary>, DomainError>;
    async fn get_team(&self, id: TeamId) -> Result<Team, DomainError>;
    async fn create_from_csv(&self, bytes: &[u8], filename: &str) -> Result<usize, DomainError>;
    async fn update_team(&self, id: TeamId, patch: TeamPatch) -> Result<Team, DomainError>;
    async fn delete_team(&self, id: TeamId) -> Result<(), DomainError>;
    async fn list_players(&self, query: &PlayerQuery) -> Result<Vec<Player>, DomainError>;
    async fn list_players_by_team(
        &self,
        team_id: TeamId,
        query: &PlayerQuery,
    ) -> Result<Vec<Player>, DomainError>;
    async fn get_team_stats(&self) -> Result<Vec<TeamStats>, DomainError>;
    async fn ping_store(&self) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
impl<T, P> TeamServiceTrait for TeamService<T, P>
where
    T: TeamRepository + ?Sized + 'static,
    P: PlayerRepository + ?Sized + 'static,
{
    async fn list_teams(&self) -> Result<Vec<TeamSummary>, DomainError> {
        TeamService::list_teams(self).await
    }

    async fn get_team(&self, id: TeamId) -> Result<Team, DomainError> {
        TeamService::get_team(self, id).await
    }

    async fn create_from_csv(&self, bytes: &[u8], filename: &str) -> Result<usize, DomainError> {
        TeamService::create_from_csv(self, bytes, filename).await
    }

    async fn update_team(&self, id: TeamId, patch: TeamPatch) -> Result<Team, DomainError> {
        TeamService::update_team(self, id, patch).await
    }

    async fn delete_team(&self, id: TeamId) -> Result<(), DomainError> {
        TeamService::delete_team(self, id).await
    }

    async fn list_players(&self, query: &PlayerQuery) -> Result<Vec<Player>, DomainError> {
        TeamService::list_players(self, query).await
    }

    async fn list_players_by_team(
        &self,
        team_id: TeamId,
        query: &PlayerQuery,
    ) -> Result<Vec<Player>, DomainError> {
        TeamService::list_players_by_team(self, team_id, query).await
    }

    async fn get_team_stats(&self) -> Result<Vec<TeamStats>, DomainError> {
        TeamService::get_team_stats(self).await
    }

    async fn ping_store(&self) -> Result<(), DomainError> {
        TeamService::ping_store(self).await
    }
}
