//! Team infrastructure: CSV import, PostgreSQL persistence and the team service

mod csv_import;
mod postgres_repository;
mod service;

pub use csv_import::parse_team_rows;
pub use postgres_repository::PostgresTeamRepository;
pub use service::{
    TeamService, DEFAULT_PLAYER_SEARCH_TTL, PLAYER_SEARCH_NAMESPACE, TEAM_STATS_CACHE_KEY,
};
