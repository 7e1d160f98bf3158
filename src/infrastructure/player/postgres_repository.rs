//! PostgreSQL player repository implementation

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::domain::player::{Player, PlayerId, PlayerRepository, PlayerSearch};
use crate::domain::team::TeamId;
use crate::domain::DomainError;
use crate::infrastructure::storage::contains_pattern;

/// PostgreSQL implementation of PlayerRepository
#[derive(Debug, Clone)]
pub struct PostgresPlayerRepository {
    pool: PgPool,
}

impl PostgresPlayerRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build the filtered, ordered and optionally paginated player query
fn build_search_query(search: &PlayerSearch) -> QueryBuilder<'_, Postgres> {
    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT id, name, nickname, team_id FROM players WHERE TRUE");

    if let Some(team_id) = search.team_id {
        builder.push(" AND team_id = ").push_bind(team_id.value());
    }

    if let Some(ref name) = search.name {
        builder.push(" AND name ILIKE ").push_bind(contains_pattern(name));
    }

    if let Some(ref nickname) = search.nickname {
        builder
            .push(" AND nickname LIKE ")
            .push_bind(contains_pattern(nickname));
    }

    builder.push(" ORDER BY id");

    if let Some(take) = search.take {
        builder.push(" LIMIT ").push_bind(to_i64(take));
    }

    if let Some(skip) = search.skip {
        builder.push(" OFFSET ").push_bind(to_i64(skip));
    }

    builder
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl PlayerRepository for PostgresPlayerRepository {
    async fn find(&self, search: &PlayerSearch) -> Result<Vec<Player>, DomainError> {
        let rows = build_search_query(search)
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to query players: {}", e)))?;

        rows.iter().map(row_to_player).collect()
    }
}

fn row_to_player(row: &PgRow) -> Result<Player, DomainError> {
    let read = |e: sqlx::Error| DomainError::storage(format!("Failed to read player row: {}", e));

    Ok(Player::new(
        PlayerId::new(row.try_get("id").map_err(read)?),
        row.try_get::<String, _>("name").map_err(read)?,
        row.try_get::<String, _>("nickname").map_err(read)?,
        TeamId::new(row.try_get("team_id").map_err(read)?),
    ))
}
