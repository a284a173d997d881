//! Errors surfaced by the engine crate.

use thiserror::Error;

use team_rules::{ConfigError, RulesError};

#[derive(Debug, Error)]
pub enum ClubhouseError {
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
