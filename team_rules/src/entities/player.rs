//! Player definition and its state transitions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{FocusMeter, Morale, PersonalityTrait, PlayerId};
use crate::config::{PlayerDefaults, Tuning};
use crate::error::{RulesError, RulesResult};
use crate::mechanics::{EventType, TraitKind};

/// Severity range accepted by event reactions.
pub const SEVERITY_RANGE: std::ops::RangeInclusive<i32> = 1..=10;

/// Requested change to both meters, before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MeterShift {
    pub focus: i32,
    pub morale: i32,
}

/// A player with evolving focus and morale.
///
/// Meters only move through [`train`](Self::train), [`play`](Self::play),
/// [`react_to_event`](Self::react_to_event) and disciplinary actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    position: String,
    rating: i32,
    focus: FocusMeter,
    morale: Morale,
    traits: Vec<PersonalityTrait>,

    /// Driver-owned attributes; never read by the engine.
    #[serde(default)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Player {
    /// Create a player with the default starting meters.
    pub fn new(
        name: impl Into<String>,
        position: impl Into<String>,
        rating: i32,
    ) -> RulesResult<Self> {
        Self::with_defaults(name, position, rating, &PlayerDefaults::default())
    }

    /// Create a player whose meters start from `defaults`.
    pub fn with_defaults(
        name: impl Into<String>,
        position: impl Into<String>,
        rating: i32,
        defaults: &PlayerDefaults,
    ) -> RulesResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RulesError::InvalidArgument("player name must not be empty".into()));
        }
        if rating < 0 {
            return Err(RulesError::InvalidArgument(format!(
                "rating must be >= 0, got {rating}"
            )));
        }

        Ok(Self {
            id: PlayerId::new(),
            name,
            position: position.into(),
            rating,
            focus: FocusMeter::with_level(defaults.focus_max, defaults.initial_focus)?,
            morale: Morale::new(defaults.initial_morale)?,
            traits: Vec::new(),
            extra: HashMap::new(),
        })
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn rating(&self) -> i32 {
        self.rating
    }

    pub fn focus(&self) -> &FocusMeter {
        &self.focus
    }

    pub fn morale(&self) -> &Morale {
        &self.morale
    }

    pub fn current_focus(&self) -> i32 {
        self.focus.current()
    }

    pub fn current_morale(&self) -> i32 {
        self.morale.current()
    }

    pub fn morale_trend(&self) -> i32 {
        self.morale.trend()
    }

    pub fn traits(&self) -> &[PersonalityTrait] {
        &self.traits
    }

    pub fn has_trait(&self, kind: TraitKind) -> bool {
        self.traits.iter().any(|t| t.kind() == kind)
    }

    /// Add a trait. A second trait of the same kind is rejected.
    pub fn add_trait(&mut self, personality: impl Into<PersonalityTrait>) -> RulesResult<()> {
        let personality = personality.into();
        if self.has_trait(personality.kind()) {
            log::warn!("{} already has trait {}", self.name, personality.kind());
            return Err(RulesError::DuplicateTraitKind(personality.kind()));
        }
        self.traits.push(personality);
        Ok(())
    }

    fn adjusted_focus(&self, base: f32, context: Option<EventType>, tuning: &Tuning) -> i32 {
        self.traits
            .iter()
            .fold(base, |delta, t| t.affect_focus(delta, context, tuning))
            .round() as i32
    }

    fn adjusted_morale(&self, base: f32, context: Option<EventType>, tuning: &Tuning) -> i32 {
        self.traits
            .iter()
            .fold(base, |delta, t| t.affect_morale(delta, context, tuning))
            .round() as i32
    }

    /// Restore focus by the trait-adjusted training gain. Morale is untouched.
    ///
    /// Training never lowers focus, even under a negative gain.
    pub fn train(&mut self, tuning: &Tuning) {
        let gain = self
            .adjusted_focus(tuning.train_focus_gain as f32, None, tuning)
            .max(0);
        self.focus.shift(gain);
        log::debug!("{} trained: focus +{} -> {}", self.name, gain, self.focus.current());
    }

    /// Spend the trait-adjusted match cost in focus.
    ///
    /// Returns `true` when this match drained focus to zero, in which case
    /// the fixed fatigue penalty has been applied to morale. A match never
    /// raises focus or morale, even under a negative cost or penalty.
    pub fn play(&mut self, tuning: &Tuning) -> bool {
        let cost = self
            .adjusted_focus(tuning.play_focus_cost as f32, None, tuning)
            .max(0);
        let before = self.focus.current();
        self.focus.shift(cost.saturating_neg());
        log::debug!("{} played: focus -{} -> {}", self.name, cost, self.focus.current());

        let exhausted = before > 0 && self.focus.current() == 0;
        if exhausted {
            let penalty = tuning.fatigue_morale_penalty.max(0);
            self.morale.apply(penalty.saturating_neg());
            log::debug!(
                "{} is exhausted: morale -{} -> {}",
                self.name,
                penalty,
                self.morale.current()
            );
        }
        exhausted
    }

    /// React to an event of the given type and severity.
    ///
    /// Base deltas come from the event's profile, scaled by
    /// `severity / reference_severity`, then adjusted by every trait. Either
    /// both meters move or, on error, neither does.
    pub fn react_to_event(
        &mut self,
        event_type: EventType,
        severity: i32,
        tuning: &Tuning,
    ) -> RulesResult<MeterShift> {
        if !SEVERITY_RANGE.contains(&severity) {
            return Err(RulesError::InvalidArgument(format!(
                "severity must be within [1, 10], got {severity}"
            )));
        }
        let profile = tuning
            .event_profile(event_type)
            .ok_or_else(|| RulesError::UnknownEventType(event_type.to_string()))?;

        let scale = severity as f32 / tuning.reference_severity as f32;
        let context = Some(event_type);
        let shift = MeterShift {
            focus: self.adjusted_focus(profile.focus_delta as f32 * scale, context, tuning),
            morale: self.adjusted_morale(profile.morale_delta as f32 * scale, context, tuning),
        };

        self.apply_shift(shift);
        log::debug!(
            "{} reacted to {} (severity {}): focus {:+} -> {}, morale {:+} -> {}",
            self.name,
            event_type,
            severity,
            shift.focus,
            self.focus.current(),
            shift.morale,
            self.morale.current()
        );
        Ok(shift)
    }

    /// Move both meters by fixed amounts. Reserved for disciplinary actions.
    pub(crate) fn apply_shift(&mut self, shift: MeterShift) {
        self.focus.shift(shift.focus);
        self.morale.apply(shift.morale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn alice() -> Player {
        let mut player = Player::new("Alice", "Forward", 80).unwrap();
        player.add_trait(TraitKind::Leader).unwrap();
        player
    }

    #[test]
    fn test_new_player() {
        let player = Player::new("Bob", "Goalkeeper", 70).unwrap();
        assert_eq!(player.name(), "Bob");
        assert_eq!(player.position(), "Goalkeeper");
        assert_eq!(player.rating(), 70);
        assert_eq!(player.current_focus(), 50);
        assert_eq!(player.current_morale(), 50);
        assert_eq!(player.morale_trend(), 0);
        assert!(player.traits().is_empty());
    }

    #[test]
    fn test_invalid_construction() {
        assert!(matches!(
            Player::new("", "Forward", 50),
            Err(RulesError::InvalidArgument(_))
        ));
        assert!(matches!(
            Player::new("Carl", "Forward", -1),
            Err(RulesError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_duplicate_trait_rejected() {
        let mut player = alice();
        let result = player.add_trait(PersonalityTrait::new(TraitKind::Leader));
        assert_eq!(result, Err(RulesError::DuplicateTraitKind(TraitKind::Leader)));
        assert_eq!(player.traits().len(), 1);

        player.add_trait(TraitKind::Professional).unwrap();
        assert_eq!(player.traits().len(), 2);
    }

    #[test]
    fn test_leader_training_gain() {
        let tuning = Tuning::default();
        let mut player = alice();
        let before = player.current_focus();

        player.train(&tuning);

        assert_eq!(player.current_focus(), before + 6);
        assert_eq!(player.current_morale(), 50);
    }

    #[test]
    fn test_training_saturates_at_max() {
        let tuning = Tuning::default();
        let mut player = alice();
        for _ in 0..20 {
            player.train(&tuning);
        }
        assert_eq!(player.current_focus(), player.focus().max());
    }

    #[test]
    fn test_play_until_exhausted_nudges_morale_once() {
        let tuning = Tuning::default();
        let mut player = alice();
        let morale_before = player.current_morale();

        let mut exhaustions = 0;
        while player.current_focus() > 0 {
            if player.play(&tuning) {
                exhaustions += 1;
            }
        }

        assert_eq!(exhaustions, 1);
        assert_eq!(player.current_morale(), morale_before - 2);
    }

    #[test]
    fn test_negative_match_cost_never_restores_focus() {
        let tuning = Tuning {
            play_focus_cost: -10,
            fatigue_morale_penalty: -2,
            ..Tuning::default()
        };
        let mut player = alice();

        player.play(&tuning);

        assert_eq!(player.current_focus(), 50);
        assert_eq!(player.current_morale(), 50);
    }

    #[test]
    fn test_extreme_costs_saturate_without_overflow() {
        let mut player = alice();

        let drained = player.play(&Tuning {
            play_focus_cost: i32::MAX,
            fatigue_morale_penalty: i32::MAX,
            ..Tuning::default()
        });
        assert!(drained);
        assert_eq!(player.current_focus(), 0);
        assert_eq!(player.current_morale(), 0);

        player.train(&Tuning {
            train_focus_gain: i32::MIN,
            ..Tuning::default()
        });
        player.play(&Tuning {
            play_focus_cost: i32::MIN,
            ..Tuning::default()
        });
        assert_eq!(player.current_focus(), 0);
    }

    #[test]
    fn test_react_to_event_scales_with_severity() {
        let tuning = Tuning::default();
        let mut player = Player::new("Dana", "Midfielder", 65).unwrap();

        // Win at reference severity: +5 focus, +10 morale.
        let shift = player.react_to_event(EventType::Win, 5, &tuning).unwrap();
        assert_eq!(shift, MeterShift { focus: 5, morale: 10 });
        assert_eq!(player.current_focus(), 55);
        assert_eq!(player.current_morale(), 60);

        // Loss at double severity: -10 focus, -16 morale.
        let shift = player.react_to_event(EventType::Loss, 10, &tuning).unwrap();
        assert_eq!(shift, MeterShift { focus: -10, morale: -16 });
        assert_eq!(player.current_focus(), 45);
        assert_eq!(player.current_morale(), 44);
        assert_eq!(player.morale_trend(), 0);
    }

    #[test]
    fn test_hothead_conflict_reaction() {
        let tuning = Tuning::default();
        let mut player = Player::new("Eli", "Defender", 60).unwrap();
        player.add_trait(TraitKind::HotHead).unwrap();

        // Conflict at reference severity: -8 focus x0.8, -6 morale x1.5.
        let shift = player.react_to_event(EventType::Conflict, 5, &tuning).unwrap();
        assert_eq!(shift, MeterShift { focus: -6, morale: -9 });
    }

    #[test]
    fn test_unknown_event_leaves_player_untouched() {
        let tuning = Tuning {
            events: Vec::new(),
            ..Tuning::default()
        };
        let mut player = alice();
        let focus = *player.focus();
        let morale = *player.morale();

        let result = player.react_to_event(EventType::Injury, 7, &tuning);

        assert!(matches!(result, Err(RulesError::UnknownEventType(name)) if name == "Injury"));
        assert_eq!(*player.focus(), focus);
        assert_eq!(*player.morale(), morale);
    }

    #[test]
    fn test_invalid_severity_leaves_player_untouched() {
        let tuning = Tuning::default();
        let mut player = alice();
        let morale = *player.morale();

        assert!(matches!(
            player.react_to_event(EventType::Win, 11, &tuning),
            Err(RulesError::InvalidArgument(_))
        ));
        assert!(player.react_to_event(EventType::Win, 0, &tuning).is_err());
        assert_eq!(*player.morale(), morale);
    }

    #[derive(Debug, Clone)]
    enum Step {
        Train,
        Play,
        React(EventType, i32),
    }

    fn step_strategy() -> impl Strategy<Value = Step> {
        prop_oneof![
            Just(Step::Train),
            Just(Step::Play),
            (prop::sample::select(EventType::ALL), 1..=10i32)
                .prop_map(|(event, severity)| Step::React(event, severity)),
        ]
    }

    fn trait_strategy() -> impl Strategy<Value = Vec<TraitKind>> {
        prop::sample::subsequence(TraitKind::ALL, 0..=TraitKind::ALL.len())
    }

    proptest! {
        #[test]
        fn meters_stay_in_bounds(
            kinds in trait_strategy(),
            steps in prop::collection::vec(step_strategy(), 0..80),
        ) {
            let tuning = Tuning::default();
            let mut player = Player::new("Prop", "Utility", 50).unwrap();
            for kind in kinds {
                player.add_trait(kind).unwrap();
            }

            for step in steps {
                match step {
                    Step::Train => player.train(&tuning),
                    Step::Play => {
                        player.play(&tuning);
                    }
                    Step::React(event, severity) => {
                        player.react_to_event(event, severity, &tuning).unwrap();
                    }
                }
                prop_assert!((0..=player.focus().max()).contains(&player.current_focus()));
                prop_assert!((0..=100).contains(&player.current_morale()));
                prop_assert!((-5..=5).contains(&player.morale_trend()));
            }
        }
    }
}
