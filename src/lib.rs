//! Team Roster API
//!
//! Team management service with:
//! - Bulk team import from CSV uploads
//! - Player search with cache-aside lookups
//! - Per-team player and support message statistics
//! - Role-based access using signed bearer tokens

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::{
    auth::JwtService,
    cache::CacheFactory,
    storage::StorageFactory,
    team::TeamService,
};
use tracing::info;

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = config.storage.storage_config()?;
    let store = StorageFactory::create(&storage_config).await?;

    let cache_config = config.cache.cache_config()?;
    let cache = CacheFactory::new().create(&cache_config).await?;
    info!(backend = %cache_config.cache_type, "Cache initialized");

    let team_service = TeamService::new(store.teams, store.players, cache.clone())
        .with_player_search_ttl(config.cache.player_search_ttl());

    let jwt_service = JwtService::new(config.auth.jwt_config());

    Ok(AppState::new(
        Arc::new(team_service),
        Arc::new(jwt_service),
        cache,
    ))
}
