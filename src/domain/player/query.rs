//! Player listing query and the store-level search it is translated into

use serde::Deserialize;

use crate::domain::team::TeamId;
use crate::domain::DomainError;

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_PAGE_SIZE: u64 = 10;

fn default_page() -> u64 {
    DEFAULT_PAGE
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// Request-scoped pagination and filter parameters for player listings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}

impl Default for PlayerQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            name: None,
            nickname: None,
        }
    }
}

impl PlayerQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// Reject non-positive page parameters
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.page == 0 {
            return Err(DomainError::bad_input("page must be a positive integer"));
        }

        if self.page_size == 0 {
            return Err(DomainError::bad_input("page_size must be a positive integer"));
        }

        Ok(())
    }

    /// Name filter, treating an empty value as absent
    pub fn name_filter(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Nickname filter, treating an empty value as absent
    pub fn nickname_filter(&self) -> Option<&str> {
        self.nickname.as_deref().filter(|nickname| !nickname.is_empty())
    }

    /// Number of rows preceding the requested page
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Number of rows in one page
    pub fn take(&self) -> u64 {
        self.page_size
    }

    /// Search across all players; page parameters are not applied here
    pub fn search(&self) -> PlayerSearch {
        PlayerSearch {
            team_id: None,
            name: self.name_filter().map(String::from),
            nickname: self.nickname_filter().map(String::from),
            skip: None,
            take: None,
        }
    }

    /// Paginated search within a single team
    pub fn for_team(&self, team_id: TeamId) -> PlayerSearch {
        PlayerSearch {
            team_id: Some(team_id),
            name: self.name_filter().map(String::from),
            nickname: self.nickname_filter().map(String::from),
            skip: Some(self.skip()),
            take: Some(self.take()),
        }
    }
}

/// Store-level player search
///
/// `name` matches case-insensitively, `nickname` case-sensitively; both are
/// substring matches and combine with AND. Results are ordered by player id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerSearch {
    pub team_id: Option<TeamId>,
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub skip: Option<u64>,
    pub take: Option<u64>,
}

impl PlayerSearch {
    /// Check a player's fields against the filters (pagination excluded)
    pub fn matches(&self, team_id: TeamId, name: &str, nickname: &str) -> bool {
        if let Some(expected) = self.team_id {
            if expected != team_id {
                return false;
            }
        }

        if let Some(ref needle) = self.name {
            if !name.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }

        if let Some(ref needle) = self.nickname {
            if !nickname.contains(needle.as_str()) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query: PlayerQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 10);
        assert!(query.name.is_none());
        assert!(query.nickname.is_none());
    }

    #[test]
    fn test_skip_and_take() {
        let query = PlayerQuery::new().with_page(2).with_page_size(5);
        assert_eq!(query.skip(), 5);
        assert_eq!(query.take(), 5);

        assert_eq!(PlayerQuery::new().skip(), 0);
    }

    #[test]
    fn test_validate_rejects_zero() {
        assert!(PlayerQuery::new().validate().is_ok());
        assert!(PlayerQuery::new().with_page(0).validate().is_err());
        assert!(PlayerQuery::new().with_page_size(0).validate().is_err());
    }

    #[test]
    fn test_empty_filters_are_absent() {
        let query = PlayerQuery::new().with_name("").with_nickname("ace");
        assert!(query.name_filter().is_none());
        assert_eq!(query.nickname_filter(), Some("ace"));
    }

    #[test]
    fn test_search_drops_pagination() {
        let search = PlayerQuery::new()
            .with_page(3)
            .with_name("al")
            .with_nickname("x")
            .search();

        assert_eq!(search.team_id, None);
        assert_eq!(search.skip, None);
        assert_eq!(search.take, None);
        assert_eq!(search.name.as_deref(), Some("al"));
    }

    #[test]
    fn test_for_team_applies_pagination() {
        let search = PlayerQuery::new()
            .with_page(2)
            .with_page_size(5)
            .for_team(TeamId::new(4));

        assert_eq!(search.team_id, Some(TeamId::new(4)));
        assert_eq!(search.skip, Some(5));
        assert_eq!(search.take, Some(5));
    }

    #[test]
    fn test_matches_name_case_insensitive() {
        let search = PlayerQuery::new().with_name("ALI").search();
        assert!(search.matches(TeamId::new(1), "Alice", "ace"));
        assert!(!search.matches(TeamId::new(1), "Bob", "ace"));
    }

    #[test]
    fn test_matches_nickname_case_sensitive() {
        let search = PlayerQuery::new().with_nickname("Ace").search();
        assert!(search.matches(TeamId::new(1), "Alice", "TheAce"));
        assert!(!search.matches(TeamId::new(1), "Alice", "theace"));
    }

    #[test]
    fn test_matches_team() {
        let search = PlayerQuery::new().for_team(TeamId::new(2));
        assert!(search.matches(TeamId::new(2), "Alice", "ace"));
        assert!(!search.matches(TeamId::new(3), "Alice", "ace"));
    }
}
