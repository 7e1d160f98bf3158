//! Player entity

use serde::{Deserialize, Serialize};

use crate::domain::team::TeamId;

/// Player identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(i64);

impl PlayerId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Player entity; always belongs to exactly one team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    nickname: String,
    team_id: TeamId,
}

impl Player {
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        nickname: impl Into<String>,
        team_id: TeamId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            nickname: nickname.into(),
            team_id,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn team_id(&self) -> TeamId {
        self.team_id
    }
}
