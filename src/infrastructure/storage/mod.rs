//! Storage infrastructure - connection pooling, migrations and stores

mod factory;
mod in_memory;
pub mod migrations;
mod postgres;

pub use factory::{RosterStore, StorageConfig, StorageFactory, StorageType};
pub use in_memory::InMemoryRosterStore;
pub use migrations::{run_roster_migrations, Migration, PostgresMigrator};
pub use postgres::{connect_pool, contains_pattern, escape_like, PostgresConfig};

#[cfg(test)]
pub(crate) use postgres::test_support;
