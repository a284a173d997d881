//! Error types for the rules crate.

use thiserror::Error;

use crate::entities::PlayerId;
use crate::mechanics::TraitKind;

/// Errors raised by player, event and roster operations.
///
/// Meter saturation is never reported here: focus, morale, chemistry and
/// culture clamp silently to their ranges.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid trait kind: {0}")]
    InvalidTraitKind(String),

    #[error("player already has a {0} trait")]
    DuplicateTraitKind(TraitKind),

    #[error("unknown event type: {0}")]
    UnknownEventType(String),

    #[error("a player named {0:?} is already on the roster")]
    DuplicateName(String),

    #[error("no player with id {0} on the roster")]
    UnknownPlayer(PlayerId),
}

/// Errors raised while loading or validating a [`Tuning`](crate::Tuning).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("config validation error: {0}")]
    Validation(String),
}

pub type RulesResult<T> = Result<T, RulesError>;
