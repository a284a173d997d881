//! The coach: chooses and applies disciplinary actions, keeping an
//! append-only record of every decision.

mod decision;

pub use decision::*;

use serde::{Deserialize, Serialize};

use team_rules::{
    ActionType, DisciplinaryAction, DisciplineStyle, Player, PlayerId, RulesError, RulesResult,
    TeamEvent, Tuning,
};

/// One entry in a coach's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachDecision {
    pub player: PlayerId,
    pub player_name: String,
    /// `None` for check-ins outside any event.
    pub event: Option<TeamEvent>,
    pub action: DisciplinaryAction,
    pub basis: DecisionBasis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coach {
    name: String,
    style: DisciplineStyle,
    table: DecisionTable,
    history: Vec<CoachDecision>,
}

impl Coach {
    /// Create a coach using the default decision table.
    pub fn new(name: impl Into<String>, style: DisciplineStyle) -> RulesResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RulesError::InvalidArgument("coach name must not be empty".into()));
        }
        Ok(Self {
            name,
            style,
            table: DecisionTable::default(),
            history: Vec::new(),
        })
    }

    pub fn with_table(mut self, table: DecisionTable) -> Self {
        self.table = table;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn style(&self) -> DisciplineStyle {
        self.style
    }

    pub fn table(&self) -> &DecisionTable {
        &self.table
    }

    /// Every decision so far, oldest first.
    pub fn history(&self) -> &[CoachDecision] {
        &self.history
    }

    pub fn actions(&self) -> impl Iterator<Item = DisciplinaryAction> + '_ {
        self.history.iter().map(|d| d.action)
    }

    fn decide(&self, player: &Player, event: &TeamEvent) -> Decision {
        self.table.decide(self.style, event, player.morale())
    }

    /// Pick a response to `event` for `player` without applying it.
    pub fn decide_action(&self, player: &Player, event: &TeamEvent) -> DisciplinaryAction {
        self.decide(player, event).action.into()
    }

    /// Decide and apply an action for each affected player, in iteration
    /// order, recording one history entry per player. Events that do not
    /// call for a decision are ignored.
    pub fn handle_event<'a, I>(
        &mut self,
        event: &TeamEvent,
        players: I,
        tuning: &Tuning,
    ) -> Vec<CoachDecision>
    where
        I: IntoIterator<Item = &'a mut Player>,
    {
        if !event.trigger_decision() {
            log::debug!("coach {} ignores {}", self.name, event);
            return Vec::new();
        }

        let mut decisions = Vec::new();
        for player in players {
            let decision = self.decide(player, event);
            let action = DisciplinaryAction::new(decision.action);
            action.apply_to_player(player, tuning);
            log::info!(
                "coach {} ({}) chose {} for {} after {} [{:?}]",
                self.name,
                self.style,
                action,
                player.name(),
                event,
                decision.basis
            );

            let record = CoachDecision {
                player: player.id(),
                player_name: player.name().to_string(),
                event: Some(*event),
                action,
                basis: decision.basis,
            };
            self.history.push(record.clone());
            decisions.push(record);
        }
        decisions
    }

    /// Routine check-in: a player whose morale is trending down gets a
    /// morale boost talk; anyone else is left alone.
    pub fn manage_player(
        &mut self,
        player: &mut Player,
        tuning: &Tuning,
    ) -> Option<DisciplinaryAction> {
        if player.morale_trend() >= 0 {
            return None;
        }

        let action = DisciplinaryAction::new(ActionType::MoraleBoostTalk);
        action.apply_to_player(player, tuning);
        log::info!("coach {} checked in with {}: {}", self.name, player.name(), action);

        self.history.push(CoachDecision {
            player: player.id(),
            player_name: player.name().to_string(),
            event: None,
            action,
            basis: DecisionBasis::CheckIn,
        });
        Some(action)
    }
}
