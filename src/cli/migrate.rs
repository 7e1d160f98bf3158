//! Migrate command - applies the PostgreSQL schema and exits

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::storage::{
    connect_pool, run_roster_migrations, PostgresMigrator, StorageConfig,
};

pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let StorageConfig::Postgres { config: pg, .. } = config.storage.storage_config()? else {
        anyhow::bail!("migrate requires storage.backend = \"postgres\"");
    };

    let pool = connect_pool(&pg).await?;
    let applied = run_roster_migrations(&pool).await?;
    let version = PostgresMigrator::new(pool.clone()).current_version().await?;

    info!(applied, version = ?version, "Migrations applied");
    pool.close().await;

    Ok(())
}
