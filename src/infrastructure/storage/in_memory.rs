//! In-memory roster store

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::player::{Player, PlayerId, PlayerRepository, PlayerSearch};
use crate::domain::team::{NewTeam, Team, TeamId, TeamRepository, TeamStats, TeamSummary};
use crate::domain::DomainError;

/// Support message row; only counted by the statistics query
#[derive(Debug, Clone)]
struct SupportMessageRow {
    team_id: TeamId,
    #[allow(dead_code)]
    content: String,
    #[allow(dead_code)]
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    teams: BTreeMap<TeamId, Team>,
    players: BTreeMap<PlayerId, Player>,
    support_messages: BTreeMap<i64, SupportMessageRow>,
    next_team_id: i64,
    next_player_id: i64,
    next_message_id: i64,
}

impl Tables {
    fn next_team_id(&mut self) -> TeamId {
        self.next_team_id += 1;
        TeamId::new(self.next_team_id)
    }

    fn next_player_id(&mut self) -> PlayerId {
        self.next_player_id += 1;
        PlayerId::new(self.next_player_id)
    }

    fn next_message_id(&mut self) -> i64 {
        self.next_message_id += 1;
        self.next_message_id
    }
}

/// Thread-safe in-memory store for teams, players and support messages
///
/// Useful for testing and development. Data is lost when the process
/// terminates. Ids come from per-table sequences starting at 1, and
/// deleting a team removes its players and support messages.
#[derive(Debug, Default)]
pub struct InMemoryRosterStore {
    tables: RwLock<Tables>,
}

impl InMemoryRosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, DomainError> {
        self.tables
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, DomainError> {
        self.tables
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Insert a player into an existing team
    pub fn insert_player(
        &self,
        team_id: TeamId,
        name: impl Into<String>,
        nickname: impl Into<String>,
    ) -> Result<Player, DomainError> {
        let mut tables = self.write()?;

        if !tables.teams.contains_key(&team_id) {
            return Err(DomainError::bad_input(format!(
                "Team '{}' does not exist",
                team_id
            )));
        }

        let id = tables.next_player_id();
        let player = Player::new(id, name, nickname, team_id);
        tables.players.insert(id, player.clone());

        Ok(player)
    }

    /// Insert a support message for an existing team, returning its id
    pub fn insert_support_message(
        &self,
        team_id: TeamId,
        content: impl Into<String>,
    ) -> Result<i64, DomainError> {
        let mut tables = self.write()?;

        if !tables.teams.contains_key(&team_id) {
            return Err(DomainError::bad_input(format!(
                "Team '{}' does not exist",
                team_id
            )));
        }

        let id = tables.next_message_id();
        tables.support_messages.insert(
            id,
            SupportMessageRow {
                team_id,
                content: content.into(),
                created_at: Utc::now(),
            },
        );

        Ok(id)
    }
}

#[async_trait]
impl TeamRepository for InMemoryRosterStore {
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        Ok(self.read()?.teams.get(&id).cloned())
    }

    async fn list_summaries(&self) -> Result<Vec<TeamSummary>, DomainError> {
        Ok(self.read()?.teams.values().map(Team::summary).collect())
    }

    async fn create_many(&self, teams: Vec<NewTeam>) -> Result<Vec<Team>, DomainError> {
        let mut tables = self.write()?;
        let mut created = Vec::with_capacity(teams.len());

        for new_team in teams {
            let id = tables.next_team_id();
            let team = Team::new(id, new_team.name, new_team.description);
            tables.teams.insert(id, team.clone());
            created.push(team);
        }

        Ok(created)
    }

    async fn update(&self, team: &Team) -> Result<Team, DomainError> {
        let mut tables = self.write()?;

        match tables.teams.get_mut(&team.id()) {
            Some(stored) => {
                *stored = team.clone();
                Ok(team.clone())
            }
            None => Err(DomainError::not_found(format!(
                "Team '{}' not found",
                team.id()
            ))),
        }
    }

    async fn delete(&self, id: TeamId) -> Result<bool, DomainError> {
        let mut tables = self.write()?;

        if tables.teams.remove(&id).is_none() {
            return Ok(false);
        }

        tables.players.retain(|_, player| player.team_id() != id);
        tables
            .support_messages
            .retain(|_, message| message.team_id != id);

        Ok(true)
    }

    async fn stats(&self) -> Result<Vec<TeamStats>, DomainError> {
        let tables = self.read()?;

        let stats = tables
            .teams
            .values()
            .map(|team| TeamStats {
                id: team.id(),
                name: team.name().to_string(),
                player_count: tables
                    .players
                    .values()
                    .filter(|player| player.team_id() == team.id())
                    .count() as i64,
                support_message_count: tables
                    .support_messages
                    .values()
                    .filter(|message| message.team_id == team.id())
                    .count() as i64,
            })
            .collect();

        Ok(stats)
    }
}

#[async_trait]
impl PlayerRepository for InMemoryRosterStore {
    async fn find(&self, search: &PlayerSearch) -> Result<Vec<Player>, DomainError> {
        let tables = self.read()?;

        let matching = tables.players.values().filter(|player| {
            search.matches(player.team_id(), player.name(), player.nickname())
        });

        let skip = search.skip.unwrap_or(0) as usize;
        let take = search.take.map_or(usize::MAX, |take| take as usize);

        Ok(matching.skip(skip).take(take).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_store() -> (InMemoryRosterStore, Vec<Team>) {
        let store = InMemoryRosterStore::new();
        let teams = store
            .create_many(vec![
                NewTeam::new("Falcons", "Weekend league"),
                NewTeam::new("Hawks", "Evening league"),
            ])
            .await
            .unwrap();

        (store, teams)
    }

    #[tokio::test]
    async fn test_create_many_assigns_sequential_ids() {
        let (store, teams) = seeded_store().await;

        assert_eq!(teams[0].id(), TeamId::new(1));
        assert_eq!(teams[1].id(), TeamId::new(2));

        let summaries = store.list_summaries().await.unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].name, "Hawks");
    }

    #[tokio::test]
    async fn test_update_missing_team() {
        let store = InMemoryRosterStore::new();
        let ghost = Team::new(TeamId::new(9), "Ghosts", "none");

        let result = store.update(&ghost).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_insert_player_requires_team() {
        let store = InMemoryRosterStore::new();

        let result = store.insert_player(TeamId::new(1), "Alice", "ace");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete_cascades() {
        let (store, teams) = seeded_store().await;
        let falcons = teams[0].id();
        let hawks = teams[1].id();

        store.insert_player(falcons, "Alice", "ace").unwrap();
        store.insert_player(hawks, "Bob", "bobby").unwrap();
        store.insert_support_message(falcons, "Go!").unwrap();

        assert!(store.delete(falcons).await.unwrap());
        assert!(!store.delete(falcons).await.unwrap());

        let remaining = store.find(&PlayerSearch::default()).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].team_id(), hawks);

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].support_message_count, 0);
    }

    #[tokio::test]
    async fn test_stats_counts() {
        let (store, teams) = seeded_store().await;
        let falcons = teams[0].id();

        for i in 0..3 {
            store
                .insert_player(falcons, format!("Player {}", i), format!("p{}", i))
                .unwrap();
        }
        store.insert_support_message(falcons, "Go!").unwrap();
        store.insert_support_message(falcons, "Again!").unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats[0].player_count, 3);
        assert_eq!(stats[0].support_message_count, 2);
        assert_eq!(stats[1].player_count, 0);
        assert_eq!(stats[1].support_message_count, 0);
    }

    #[tokio::test]
    async fn test_find_paginates_in_id_order() {
        let (store, teams) = seeded_store().await;
        let falcons = teams[0].id();

        for i in 0..12 {
            store
                .insert_player(falcons, format!("Player {}", i), format!("p{}", i))
                .unwrap();
        }

        let search = PlayerSearch {
            team_id: Some(falcons),
            skip: Some(5),
            take: Some(5),
            ..Default::default()
        };

        let page = store.find(&search).await.unwrap();
        assert_eq!(page.len(), 5);
        assert_eq!(page[0].name(), "Player 5");
        assert_eq!(page[4].name(), "Player 9");
    }
}
