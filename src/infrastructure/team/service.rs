//! Team service: team management, player queries and statistics

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::csv_import::parse_team_rows;
use crate::domain::cache::{Cache, CacheExt, CacheKeyGenerator, CacheKeyParams, DefaultKeyGenerator};
use crate::domain::player::{Player, PlayerQuery, PlayerRepository};
use crate::domain::team::{Team, TeamId, TeamPatch, TeamRepository, TeamStats, TeamSummary};
use crate::domain::DomainError;

/// Cache key of the team statistics aggregate
pub const TEAM_STATS_CACHE_KEY: &str = "teamStats";

/// Cache namespace of combined name and nickname player searches
pub const PLAYER_SEARCH_NAMESPACE: &str = "searchAllPlayers";

/// Lifetime of a cached player search
pub const DEFAULT_PLAYER_SEARCH_TTL: Duration = Duration::from_secs(300);

/// Team service over a team store, a player store and a cache
///
/// Player searches filtering on both name and nickname are cached for a
/// bounded time; team statistics are cached without expiry. Neither cache
/// is invalidated by writes.
pub struct TeamService<T, P>
where
    T: TeamRepository + ?Sized,
    P: PlayerRepository + ?Sized,
{
    teams: Arc<T>,
    players: Arc<P>,
    cache: Arc<dyn Cache>,
    key_generator: DefaultKeyGenerator,
    player_search_ttl: Duration,
}

impl<T, P> TeamService<T, P>
where
    T: TeamRepository + ?Sized,
    P: PlayerRepository + ?Sized,
{
    /// Create a new team service
    pub fn new(teams: Arc<T>, players: Arc<P>, cache: Arc<dyn Cache>) -> Self {
        Self {
            teams,
            players,
            cache,
            key_generator: DefaultKeyGenerator::new(),
            player_search_ttl: DEFAULT_PLAYER_SEARCH_TTL,
        }
    }

    /// Override how long combined player searches stay cached
    pub fn with_player_search_ttl(mut self, ttl: Duration) -> Self {
        self.player_search_ttl = ttl;
        self
    }

    /// List every team as `{id, name}`
    pub async fn list_teams(&self) -> Result<Vec<TeamSummary>, DomainError> {
        debug!("Listing teams");
        self.teams.list_summaries().await
    }

    /// Get a team by ID
    pub async fn get_team(&self, id: TeamId) -> Result<Team, DomainError> {
        self.require_team(id).await
    }

    /// Import teams from an uploaded CSV file, returning how many were created
    pub async fn create_from_csv(&self, bytes: &[u8], filename: &str) -> Result<usize, DomainError> {
        let rows = parse_team_rows(bytes, filename).map_err(|e| {
            warn!(filename = %filename, error = %e, "Rejected team import");
            DomainError::from(e)
        })?;

        info!(filename = %filename, rows = rows.len(), "Importing teams");

        let created = self.teams.create_many(rows).await?;
        Ok(created.len())
    }

    /// Apply a partial update to a team
    pub async fn update_team(&self, id: TeamId, patch: TeamPatch) -> Result<Team, DomainError> {
        info!(id = %id, "Updating team");

        let mut team = self.require_team(id).await?;
        team.apply(patch);

        self.teams.update(&team).await
    }

    /// Delete a team together with its players and support messages
    pub async fn delete_team(&self, id: TeamId) -> Result<(), DomainError> {
        info!(id = %id, "Deleting team");

        self.require_team(id).await?;

        if !self.teams.delete(id).await? {
            return Err(team_not_found(id));
        }

        Ok(())
    }

    /// Search players across all teams
    ///
    /// Page parameters are validated but not applied. Searches on both name
    /// and nickname are served from the cache when possible.
    pub async fn list_players(&self, query: &PlayerQuery) -> Result<Vec<Player>, DomainError> {
        query.validate()?;
        let search = query.search();

        let (Some(name), Some(nickname)) = (query.name_filter(), query.nickname_filter()) else {
            debug!("Searching players without cache");
            return self.players.find(&search).await;
        };

        let key = self.player_search_key(name, nickname);

        let cached: Option<Vec<Player>> = self.cache.get(&key).await?;

        if let Some(players) = cached {
            debug!(key = %key, "Player search cache hit");
            return Ok(players);
        }

        debug!(key = %key, "Player search cache miss");
        let players = self.players.find(&search).await?;
        self.cache
            .set(&key, &players, Some(self.player_search_ttl))
            .await?;

        Ok(players)
    }

    /// List one page of a team's players, ordered by id
    pub async fn list_players_by_team(
        &self,
        team_id: TeamId,
        query: &PlayerQuery,
    ) -> Result<Vec<Player>, DomainError> {
        query.validate()?;
        debug!(team_id = %team_id, page = query.page, page_size = query.page_size, "Listing team players");

        self.players.find(&query.for_team(team_id)).await
    }

    /// Per-team player and support message counts
    pub async fn get_team_stats(&self) -> Result<Vec<TeamStats>, DomainError> {
        let cached: Option<Vec<TeamStats>> = self.cache.get(TEAM_STATS_CACHE_KEY).await?;

        if let Some(stats) = cached {
            debug!("Team stats cache hit");
            return Ok(stats);
        }

        debug!("Team stats cache miss");
        let stats = self.teams.stats().await?;
        self.cache.set(TEAM_STATS_CACHE_KEY, &stats, None).await?;

        Ok(stats)
    }

    /// Check that the team store is reachable
    pub async fn ping_store(&self) -> Result<(), DomainError> {
        self.teams.ping().await
    }

    async fn require_team(&self, id: TeamId) -> Result<Team, DomainError> {
        self.teams
            .get(id)
            .await?
            .ok_or_else(|| team_not_found(id))
    }

    fn player_search_key(&self, name: &str, nickname: &str) -> String {
        let params = CacheKeyParams::default()
            .with_component("name", name)
            .with_component("nickname", nickname);

        self.key_generator
            .generate_with_namespace(PLAYER_SEARCH_NAMESPACE, &params)
    }
}

fn team_not_found(id: TeamId) -> DomainError {
    DomainError::not_found(format!("Team '{}' not found", id))
}
