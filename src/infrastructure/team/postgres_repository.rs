//! PostgreSQL team repository implementation

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::domain::team::{NewTeam, Team, TeamId, TeamRepository, TeamStats, TeamSummary};
use crate::domain::DomainError;

/// PostgreSQL implementation of TeamRepository
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query("SELECT id, name, description FROM teams WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get team: {}", e)))?;

        row.as_ref().map(row_to_team).transpose()
    }

    async fn list_summaries(&self) -> Result<Vec<TeamSummary>, DomainError> {
        let rows = sqlx::query("SELECT id, name FROM teams ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list teams: {}", e)))?;

        rows.iter()
            .map(|row| {
                Ok(TeamSummary {
                    id: TeamId::new(get_column(row, "id")?),
                    name: get_column(row, "name")?,
                })
            })
            .collect()
    }

    async fn create_many(&self, teams: Vec<NewTeam>) -> Result<Vec<Team>, DomainError> {
        if teams.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO teams (name, description) ");
        builder.push_values(&teams, |mut values, team| {
            values.push_bind(&team.name).push_bind(&team.description);
        });
        builder.push(" RETURNING id, name, description");

        let rows = builder
            .build()
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to insert teams: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit team import: {}", e)))?;

        let mut created = rows.iter().map(row_to_team).collect::<Result<Vec<_>, _>>()?;
        created.sort_by_key(Team::id);

        Ok(created)
    }

    async fn update(&self, team: &Team) -> Result<Team, DomainError> {
        let row = sqlx::query(
            r#"
            UPDATE teams
            SET name = $2, description = $3
            WHERE id = $1
            RETURNING id, name, description
            "#,
        )
        .bind(team.id().value())
        .bind(team.name())
        .bind(team.description())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update team: {}", e)))?;

        match row {
            Some(row) => row_to_team(&row),
            None => Err(DomainError::not_found(format!(
                "Team '{}' not found",
                team.id()
            ))),
        }
    }

    async fn delete(&self, id: TeamId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete team: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn stats(&self) -> Result<Vec<TeamStats>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT t.id,
                   t.name,
                   COUNT(DISTINCT p.id) AS player_count,
                   COUNT(DISTINCT m.id) AS support_message_count
            FROM teams t
            LEFT JOIN players p ON p.team_id = t.id
            LEFT JOIN support_messages m ON m.team_id = t.id
            GROUP BY t.id, t.name
            ORDER BY t.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to compute team stats: {}", e)))?;

        rows.iter()
            .map(|row| {
                Ok(TeamStats {
                    id: TeamId::new(get_column(row, "id")?),
                    name: get_column(row, "name")?,
                    player_count: get_column(row, "player_count")?,
                    support_message_count: get_column(row, "support_message_count")?,
                })
            })
            .collect()
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| DomainError::storage(format!("Database ping failed: {}", e)))
    }
}

fn get_column<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(column)
        .map_err(|e| DomainError::storage(format!("Failed to read column '{}': {}", column, e)))
}

fn row_to_team(row: &PgRow) -> Result<Team, DomainError> {
    Ok(Team::new(
        TeamId::new(get_column(row, "id")?),
        get_column::<String>(row, "name")?,
        get_column::<String>(row, "description")?,
    ))
}
