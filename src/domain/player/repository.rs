//! Player repository trait

use async_trait::async_trait;

use super::entity::Player;
use super::query::PlayerSearch;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Read access to persisted players
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Find players matching the search, ordered by id
    async fn find(&self, search: &PlayerSearch) -> Result<Vec<Player>, DomainError>;
}
