//! Tunable numbers behind every state transition.
//!
//! Defaults carry the reference values; any subset can be overridden from
//! TOML, e.g.
//!
//! ```toml
//! train_focus_gain = 8
//!
//! [team]
//! culture_spread_penalty = 0.75
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::mechanics::{ActionType, EventType, TraitKind};

/// Coefficient replacement for a trait under a specific event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOverride {
    pub event: EventType,
    pub focus: Option<f32>,
    pub morale: Option<f32>,
}

/// Focus and morale multipliers for one trait kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitProfile {
    pub kind: TraitKind,
    pub focus: f32,
    pub morale: f32,
    #[serde(default)]
    pub overrides: Vec<EventOverride>,
}

impl TraitProfile {
    pub fn new(kind: TraitKind, focus: f32, morale: f32) -> Self {
        Self {
            kind,
            focus,
            morale,
            overrides: Vec::new(),
        }
    }

    pub fn with_override(
        mut self,
        event: EventType,
        focus: Option<f32>,
        morale: Option<f32>,
    ) -> Self {
        self.overrides.push(EventOverride { event, focus, morale });
        self
    }

    fn override_for(&self, context: Option<EventType>) -> Option<&EventOverride> {
        let event = context?;
        self.overrides.iter().find(|o| o.event == event)
    }

    /// Focus multiplier, taking an event-specific override into account.
    pub fn focus_coefficient(&self, context: Option<EventType>) -> f32 {
        self.override_for(context)
            .and_then(|o| o.focus)
            .unwrap_or(self.focus)
    }

    /// Morale multiplier, taking an event-specific override into account.
    pub fn morale_coefficient(&self, context: Option<EventType>) -> f32 {
        self.override_for(context)
            .and_then(|o| o.morale)
            .unwrap_or(self.morale)
    }
}

/// Base deltas of an event at the reference severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventProfile {
    pub event: EventType,
    pub focus_delta: i32,
    pub morale_delta: i32,
}

/// Fixed meter effect of a disciplinary action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionEffect {
    #[serde(default)]
    pub focus_delta: i32,
    #[serde(default)]
    pub morale_delta: i32,
}

impl ActionEffect {
    pub const fn new(focus_delta: i32, morale_delta: i32) -> Self {
        Self {
            focus_delta,
            morale_delta,
        }
    }
}

/// Effects for each [`ActionType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionEffects {
    pub warning: ActionEffect,
    pub benching: ActionEffect,
    pub morale_boost_talk: ActionEffect,
    pub fine_or_penalty: ActionEffect,
}

impl ActionEffects {
    pub fn effect(&self, action: ActionType) -> ActionEffect {
        match action {
            ActionType::Warning => self.warning,
            ActionType::Benching => self.benching,
            ActionType::MoraleBoostTalk => self.morale_boost_talk,
            ActionType::FineOrPenalty => self.fine_or_penalty,
        }
    }
}

impl Default for ActionEffects {
    fn default() -> Self {
        Self {
            warning: ActionEffect::new(0, -3),
            benching: ActionEffect::new(-15, -5),
            morale_boost_talk: ActionEffect::new(0, 8),
            fine_or_penalty: ActionEffect::new(0, -10),
        }
    }
}

/// Starting meters for newly created players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerDefaults {
    pub focus_max: i32,
    pub initial_focus: i32,
    pub initial_morale: i32,
}

impl Default for PlayerDefaults {
    fn default() -> Self {
        Self {
            focus_max: 100,
            initial_focus: 50,
            initial_morale: 50,
        }
    }
}

/// Weights for the derived team metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamWeights {
    /// Share of chemistry driven by average focus (as a percentage of max).
    pub chemistry_focus_weight: f32,
    /// Share of chemistry driven by average morale.
    pub chemistry_morale_weight: f32,
    /// Culture points lost per point of morale standard deviation.
    pub culture_spread_penalty: f32,
}

impl Default for TeamWeights {
    fn default() -> Self {
        Self {
            chemistry_focus_weight: 0.4,
            chemistry_morale_weight: 0.6,
            culture_spread_penalty: 0.5,
        }
    }
}

/// Every tunable number used by players, events and actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerDefaults,
    pub train_focus_gain: i32,
    pub play_focus_cost: i32,
    /// Morale lost when a match drains focus to zero. Not trait-adjusted.
    pub fatigue_morale_penalty: i32,
    /// Severity at which event profiles apply unscaled.
    pub reference_severity: i32,
    pub traits: Vec<TraitProfile>,
    pub events: Vec<EventProfile>,
    pub actions: ActionEffects,
    pub team: TeamWeights,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: PlayerDefaults::default(),
            train_focus_gain: 5,
            play_focus_cost: 10,
            fatigue_morale_penalty: 2,
            reference_severity: 5,
            traits: vec![
                TraitProfile::new(TraitKind::Leader, 1.2, 1.1),
                TraitProfile::new(TraitKind::HotHead, 1.0, 1.3).with_override(
                    EventType::Conflict,
                    Some(0.8),
                    Some(1.5),
                ),
                TraitProfile::new(TraitKind::Professional, 1.1, 0.9),
                TraitProfile::new(TraitKind::Introvert, 1.0, 1.0).with_override(
                    EventType::PublicCriticism,
                    Some(0.9),
                    Some(1.4),
                ),
            ],
            events: vec![
                EventProfile {
                    event: EventType::Win,
                    focus_delta: 5,
                    morale_delta: 10,
                },
                EventProfile {
                    event: EventType::Loss,
                    focus_delta: -5,
                    morale_delta: -8,
                },
                EventProfile {
                    event: EventType::Conflict,
                    focus_delta: -8,
                    morale_delta: -6,
                },
                EventProfile {
                    event: EventType::Injury,
                    focus_delta: -10,
                    morale_delta: -12,
                },
                EventProfile {
                    event: EventType::PublicCriticism,
                    focus_delta: -6,
                    morale_delta: -8,
                },
                EventProfile {
                    event: EventType::Milestone,
                    focus_delta: 4,
                    morale_delta: 12,
                },
            ],
            actions: ActionEffects::default(),
            team: TeamWeights::default(),
        }
    }
}

impl Tuning {
    /// Parse a TOML document layered over the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = toml::from_str(content)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a TOML file layered over the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn trait_profile(&self, kind: TraitKind) -> Option<&TraitProfile> {
        self.traits.iter().find(|p| p.kind == kind)
    }

    pub fn event_profile(&self, event: EventType) -> Option<&EventProfile> {
        self.events.iter().find(|p| p.event == event)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Validation(msg));

        let p = &self.player;
        if p.focus_max < 0 {
            return invalid(format!("player.focus_max must be >= 0, got {}", p.focus_max));
        }
        if !(0..=p.focus_max).contains(&p.initial_focus) {
            return invalid(format!(
                "player.initial_focus {} outside [0, {}]",
                p.initial_focus, p.focus_max
            ));
        }
        if !(0..=100).contains(&p.initial_morale) {
            return invalid(format!("player.initial_morale {} outside [0, 100]", p.initial_morale));
        }

        for (name, value) in [
            ("train_focus_gain", self.train_focus_gain),
            ("play_focus_cost", self.play_focus_cost),
            ("fatigue_morale_penalty", self.fatigue_morale_penalty),
        ] {
            if value < 0 {
                return invalid(format!("{name} must be >= 0, got {value}"));
            }
        }
        if self.reference_severity <= 0 {
            return invalid(format!(
                "reference_severity must be > 0, got {}",
                self.reference_severity
            ));
        }

        let coefficient_ok = |c: f32| c.is_finite() && c >= 0.0;
        let mut seen_traits = HashSet::new();
        for profile in &self.traits {
            if !seen_traits.insert(profile.kind) {
                return invalid(format!("duplicate trait profile for {}", profile.kind));
            }
            let overridden = profile
                .overrides
                .iter()
                .flat_map(|o| [o.focus, o.morale])
                .flatten();
            if ![profile.focus, profile.morale]
                .into_iter()
                .chain(overridden)
                .all(coefficient_ok)
            {
                return invalid(format!(
                    "trait {} has a negative or non-finite coefficient",
                    profile.kind
                ));
            }
        }

        let mut seen_events = HashSet::new();
        for profile in &self.events {
            if !seen_events.insert(profile.event) {
                return invalid(format!("duplicate event profile for {}", profile.event));
            }
        }

        let w = &self.team;
        if ![w.chemistry_focus_weight, w.chemistry_morale_weight, w.culture_spread_penalty]
            .into_iter()
            .all(coefficient_ok)
        {
            return invalid("team weights must be finite and >= 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.train_focus_gain, 5);
        assert_eq!(tuning.fatigue_morale_penalty, 2);
        for event in EventType::ALL {
            assert!(tuning.event_profile(*event).is_some());
        }
    }

    #[test]
    fn test_trait_override_applies_only_to_its_event() {
        let tuning = Tuning::default();
        let hothead = tuning.trait_profile(TraitKind::HotHead).unwrap();

        assert!((hothead.focus_coefficient(Some(EventType::Conflict)) - 0.8).abs() < 1e-6);
        assert!((hothead.focus_coefficient(Some(EventType::Loss)) - 1.0).abs() < 1e-6);
        assert!((hothead.focus_coefficient(None) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_toml_layers_over_defaults() {
        let toml_str = r#"
            train_focus_gain = 8

            [team]
            culture_spread_penalty = 0.75

            [actions.warning]
            morale_delta = -4
        "#;

        let tuning = Tuning::from_toml_str(toml_str).unwrap();
        assert_eq!(tuning.train_focus_gain, 8);
        assert_eq!(tuning.play_focus_cost, 10);
        assert!((tuning.team.culture_spread_penalty - 0.75).abs() < 1e-6);
        assert!((tuning.team.chemistry_morale_weight - 0.6).abs() < 1e-6);
        assert_eq!(tuning.actions.warning, ActionEffect::new(0, -4));
        assert_eq!(tuning.actions.benching, ActionEffect::new(-15, -5));
        assert_eq!(tuning.traits.len(), 4);
    }

    #[test]
    fn test_trait_table_from_toml() {
        let toml_str = r#"
            [[traits]]
            kind = "Leader"
            focus = 1.5
            morale = 1.0

            [[traits.overrides]]
            event = "Loss"
            morale = 0.5
        "#;

        let tuning = Tuning::from_toml_str(toml_str).unwrap();
        let leader = tuning.trait_profile(TraitKind::Leader).unwrap();
        assert!((leader.focus - 1.5).abs() < 1e-6);
        assert!((leader.morale_coefficient(Some(EventType::Loss)) - 0.5).abs() < 1e-6);
        assert!(tuning.trait_profile(TraitKind::HotHead).is_none());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let result = Tuning::from_toml_str("reference_severity = 0");
        assert!(matches!(result, Err(ConfigError::Validation(_))));

        let result = Tuning::from_toml_str("play_focus_cost = -1");
        assert!(matches!(result, Err(ConfigError::Validation(_))));

        let mut tuning = Tuning::default();
        tuning.traits.push(TraitProfile::new(TraitKind::Leader, 1.0, 1.0));
        assert!(matches!(tuning.validate(), Err(ConfigError::Validation(_))));

        let mut tuning = Tuning::default();
        tuning.player.initial_focus = 150;
        assert!(matches!(tuning.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_toml_parse_error() {
        let result = Tuning::from_toml_str("train_focus_gain = \"lots\"");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_from_file_layers_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "train_focus_gain = 9").unwrap();
        writeln!(file, "[team]").unwrap();
        writeln!(file, "culture_spread_penalty = 0.25").unwrap();

        let tuning = Tuning::from_file(file.path()).unwrap();

        assert_eq!(tuning.train_focus_gain, 9);
        assert!((tuning.team.culture_spread_penalty - 0.25).abs() < 1e-6);
        assert_eq!(tuning.play_focus_cost, Tuning::default().play_focus_cost);
        assert_eq!(tuning.events, Tuning::default().events);
    }

    #[test]
    fn test_serialized_defaults_reload() {
        let tuning = Tuning::default();
        let text = tuning.to_toml_string().unwrap();
        let reloaded = Tuning::from_toml_str(&text).unwrap();
        assert_eq!(reloaded, tuning);
    }
}
