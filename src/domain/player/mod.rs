//! Player domain module

mod entity;
mod query;
mod repository;

pub use entity::{Player, PlayerId};
pub use query::{PlayerQuery, PlayerSearch};
pub use repository::PlayerRepository;

#[cfg(test)]
pub use repository::MockPlayerRepository;
