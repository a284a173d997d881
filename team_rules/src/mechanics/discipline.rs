//! Disciplinary actions a coach can apply.

use serde::{Deserialize, Serialize};

use super::ActionType;
use crate::config::Tuning;
use crate::entities::{MeterShift, Player};

/// An immutable coaching decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisciplinaryAction {
    action_type: ActionType,
}

impl DisciplinaryAction {
    pub fn new(action_type: ActionType) -> Self {
        Self { action_type }
    }

    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    /// Apply the action's fixed effect. Never fails; meters saturate.
    pub fn apply_to_player(&self, player: &mut Player, tuning: &Tuning) -> MeterShift {
        let effect = tuning.actions.effect(self.action_type);
        let shift = MeterShift {
            focus: effect.focus_delta,
            morale: effect.morale_delta,
        };
        player.apply_shift(shift);
        log::debug!(
            "{} applied to {}: focus -> {}, morale -> {}",
            self.action_type,
            player.name(),
            player.current_focus(),
            player.current_morale()
        );
        shift
    }
}

impl From<ActionType> for DisciplinaryAction {
    fn from(action_type: ActionType) -> Self {
        Self::new(action_type)
    }
}

impl std::fmt::Display for DisciplinaryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.action_type)
    }
}
