//! Player-side entities: meters, traits and the player itself.

mod components;
mod personality;
mod player;

pub use components::*;
pub use personality::*;
pub use player::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable handle for a player, valid for the player's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Create a new random player ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
