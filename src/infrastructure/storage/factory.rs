//! Storage factory for runtime storage selection

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::domain::{DomainError, PlayerRepository, TeamRepository};
use crate::infrastructure::player::PostgresPlayerRepository;
use crate::infrastructure::team::PostgresTeamRepository;

use super::in_memory::InMemoryRosterStore;
use super::migrations::run_roster_migrations;
use super::postgres::{connect_pool, PostgresConfig};

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl std::str::FromStr for StorageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(DomainError::configuration(format!(
                "Unknown storage backend: {}. Valid backends: memory, postgres",
                other
            ))),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres {
        config: PostgresConfig,
        run_migrations: bool,
    },
}

impl StorageConfig {
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// PostgreSQL storage that applies pending migrations on startup
    pub fn postgres(config: PostgresConfig) -> Self {
        Self::Postgres {
            config,
            run_migrations: true,
        }
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres { .. } => StorageType::Postgres,
        }
    }
}

/// Team and player repositories sharing one backing store
#[derive(Clone)]
pub struct RosterStore {
    pub teams: Arc<dyn TeamRepository>,
    pub players: Arc<dyn PlayerRepository>,
}

impl RosterStore {
    /// Both repositories served by one in-memory store
    pub fn in_memory(store: Arc<InMemoryRosterStore>) -> Self {
        Self {
            teams: store.clone(),
            players: store,
        }
    }

    /// Both repositories served by one PostgreSQL pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            teams: Arc::new(PostgresTeamRepository::new(pool.clone())),
            players: Arc::new(PostgresPlayerRepository::new(pool)),
        }
    }
}

/// Factory for creating storage instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates the roster store described by the configuration
    pub async fn create(config: &StorageConfig) -> Result<RosterStore, DomainError> {
        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory roster store");
                Ok(RosterStore::in_memory(Arc::new(InMemoryRosterStore::new())))
            }
            StorageConfig::Postgres {
                config,
                run_migrations,
            } => {
                let pool = connect_pool(config).await?;
                info!(max_connections = config.max_connections, "Connected to PostgreSQL");

                if *run_migrations {
                    let applied = run_roster_migrations(&pool).await?;
                    info!(applied, "Database migrations complete");
                }

                Ok(RosterStore::postgres(pool))
            }
        }
    }
}
