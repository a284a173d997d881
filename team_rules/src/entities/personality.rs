//! Personality traits and how they scale meter deltas.

use serde::{Deserialize, Serialize};

use crate::config::Tuning;
use crate::error::RulesResult;
use crate::mechanics::{EventType, TraitKind};

/// An immutable personality tag. Kinds without a profile in the active
/// [`Tuning`] are neutral (coefficient 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonalityTrait {
    kind: TraitKind,
}

impl PersonalityTrait {
    pub fn new(kind: TraitKind) -> Self {
        Self { kind }
    }

    /// Build a trait from its name, failing with `InvalidTraitKind`.
    pub fn parse(name: &str) -> RulesResult<Self> {
        Ok(Self::new(name.parse()?))
    }

    pub fn kind(&self) -> TraitKind {
        self.kind
    }

    /// Scale a focus delta. `context` is the event being reacted to, if any.
    pub fn affect_focus(&self, delta: f32, context: Option<EventType>, tuning: &Tuning) -> f32 {
        let coefficient = tuning
            .trait_profile(self.kind)
            .map_or(1.0, |p| p.focus_coefficient(context));
        delta * coefficient
    }

    /// Scale a morale delta. `context` is the event being reacted to, if any.
    pub fn affect_morale(&self, delta: f32, context: Option<EventType>, tuning: &Tuning) -> f32 {
        let coefficient = tuning
            .trait_profile(self.kind)
            .map_or(1.0, |p| p.morale_coefficient(context));
        delta * coefficient
    }
}

impl From<TraitKind> for PersonalityTrait {
    fn from(kind: TraitKind) -> Self {
        Self::new(kind)
    }
}
