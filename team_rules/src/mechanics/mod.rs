//! Simulation vocabulary: trait kinds, event types, disciplinary actions and
//! coaching styles.

mod discipline;
mod event;

pub use discipline::*;
pub use event::*;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RulesError;

/// Lowercases and strips separators so "Public Criticism", "public_criticism"
/// and "PublicCriticism" all parse alike.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Kinds of personality trait a player can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TraitKind {
    Leader,
    HotHead,
    Professional,
    Introvert,
}

impl TraitKind {
    pub const ALL: &'static [TraitKind] = &[
        TraitKind::Leader,
        TraitKind::HotHead,
        TraitKind::Professional,
        TraitKind::Introvert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TraitKind::Leader => "Leader",
            TraitKind::HotHead => "HotHead",
            TraitKind::Professional => "Professional",
            TraitKind::Introvert => "Introvert",
        }
    }
}

impl std::fmt::Display for TraitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TraitKind {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        TraitKind::ALL
            .iter()
            .copied()
            .find(|kind| normalize(kind.as_str()) == wanted)
            .ok_or_else(|| RulesError::InvalidTraitKind(s.to_string()))
    }
}

/// Things that can happen to a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventType {
    Win,
    Loss,
    Conflict,
    Injury,
    PublicCriticism,
    Milestone,
}

impl EventType {
    pub const ALL: &'static [EventType] = &[
        EventType::Win,
        EventType::Loss,
        EventType::Conflict,
        EventType::Injury,
        EventType::PublicCriticism,
        EventType::Milestone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Win => "Win",
            EventType::Loss => "Loss",
            EventType::Conflict => "Conflict",
            EventType::Injury => "Injury",
            EventType::PublicCriticism => "PublicCriticism",
            EventType::Milestone => "Milestone",
        }
    }

    /// Whether the coach is expected to respond to this kind of event.
    pub fn is_coach_relevant(&self) -> bool {
        matches!(
            self,
            EventType::Loss | EventType::Conflict | EventType::Injury | EventType::PublicCriticism
        )
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        EventType::ALL
            .iter()
            .copied()
            .find(|kind| normalize(kind.as_str()) == wanted)
            .ok_or_else(|| RulesError::UnknownEventType(s.to_string()))
    }
}

/// Responses a coach can hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    Warning,
    Benching,
    MoraleBoostTalk,
    FineOrPenalty,
}

impl ActionType {
    pub const ALL: &'static [ActionType] = &[
        ActionType::Warning,
        ActionType::Benching,
        ActionType::MoraleBoostTalk,
        ActionType::FineOrPenalty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Warning => "Warning",
            ActionType::Benching => "Benching",
            ActionType::MoraleBoostTalk => "MoraleBoostTalk",
            ActionType::FineOrPenalty => "FineOrPenalty",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        ActionType::ALL
            .iter()
            .copied()
            .find(|kind| normalize(kind.as_str()) == wanted)
            .ok_or_else(|| RulesError::InvalidArgument(format!("unknown action type {s:?}")))
    }
}

/// A coach's fixed disciplinary policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DisciplineStyle {
    Strict,
    Lenient,
    #[default]
    Balanced,
}

impl DisciplineStyle {
    pub const ALL: &'static [DisciplineStyle] = &[
        DisciplineStyle::Strict,
        DisciplineStyle::Lenient,
        DisciplineStyle::Balanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisciplineStyle::Strict => "Strict",
            DisciplineStyle::Lenient => "Lenient",
            DisciplineStyle::Balanced => "Balanced",
        }
    }

    /// Action chosen when no decision rule matches.
    pub fn default_action(&self) -> ActionType {
        match self {
            DisciplineStyle::Strict => ActionType::Warning,
            DisciplineStyle::Balanced => ActionType::Warning,
            DisciplineStyle::Lenient => ActionType::MoraleBoostTalk,
        }
    }
}

impl std::fmt::Display for DisciplineStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisciplineStyle {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        DisciplineStyle::ALL
            .iter()
            .copied()
            .find(|style| normalize(style.as_str()) == wanted)
            .ok_or_else(|| RulesError::InvalidArgument(format!("unknown discipline style {s:?}")))
    }
}
