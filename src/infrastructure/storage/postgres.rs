//! PostgreSQL connection pooling

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::domain::DomainError;

/// PostgreSQL connection configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/team_roster".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_idle_timeout(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }
}

/// Open a connection pool with the configured limits
pub async fn connect_pool(config: &PostgresConfig) -> Result<PgPool, DomainError> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))
}

/// Escape `%`, `_` and `\` so a value matches literally inside a LIKE pattern
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

/// Wrap a value as a substring LIKE pattern
pub fn contains_pattern(value: &str) -> String {
    format!("%{}%", escape_like(value))
}

// Run with: DATABASE_URL=postgres://... cargo test -- --ignored
#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::PgPool;
    use tokio::sync::Mutex;

    use super::{connect_pool, PostgresConfig};
    use crate::domain::team::TeamId;
    use crate::infrastructure::storage::run_roster_migrations;

    const DEFAULT_TEST_URL: &str = "postgres://localhost/team_roster_test";

    static MIGRATIONS: Mutex<()> = Mutex::const_new(());

    /// Pool against `DATABASE_URL` with the roster schema applied
    pub(crate) async fn migrated_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_TEST_URL.to_string());
        let pool = connect_pool(&PostgresConfig::new(url)).await.unwrap();

        let _guard = MIGRATIONS.lock().await;
        run_roster_migrations(&pool).await.unwrap();

        pool
    }

    /// Name that will not collide with rows left by other test runs
    pub(crate) fn unique(label: &str) -> String {
        format!("{} {}", label, uuid::Uuid::new_v4().simple())
    }

    pub(crate) async fn insert_player(pool: &PgPool, team_id: TeamId, name: &str, nickname: &str) {
        sqlx::query("INSERT INTO players (name, nickname, team_id) VALUES ($1, $2, $3)")
            .bind(name)
            .bind(nickname)
            .bind(team_id.value())
            .execute(pool)
            .await
            .unwrap();
    }

    pub(crate) async fn insert_support_message(pool: &PgPool, team_id: TeamId, content: &str) {
        sqlx::query("INSERT INTO support_messages (team_id, content) VALUES ($1, $2)")
            .bind(team_id.value())
            .bind(content)
            .execute(pool)
            .await
            .unwrap();
    }

    pub(crate) async fn count_rows(pool: &PgPool, table: &str, team_id: TeamId) -> i64 {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE team_id = $1", table);

        sqlx::query_scalar(&sql)
            .bind(team_id.value())
            .fetch_one(pool)
            .await
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = PostgresConfig::new("postgres://db/roster")
            .with_max_connections(20)
            .with_min_connections(2)
            .with_connect_timeout(5)
            .with_idle_timeout(60);

        assert_eq!(config.url, "postgres://db/roster");
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.connect_timeout_secs, 5);
        assert_eq!(config.idle_timeout_secs, 60);
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[test]
    fn test_contains_pattern() {
        assert_eq!(contains_pattern("ace"), "%ace%");
    }
}
