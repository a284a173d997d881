//! A running simulation: one team, its coach and the tuning they share.

use serde::{Deserialize, Serialize};
use std::path::Path;

use team_rules::{
    DisciplinaryAction, MeterShift, Player, PlayerId, RulesError, RulesResult, Team, TeamEvent,
    Tuning,
};

use crate::coach::{Coach, CoachDecision};
use crate::error::ClubhouseError;

/// Which players an event reaches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Affected {
    /// Whole roster, in roster order.
    All,
    /// The listed players, in list order. Repeats are ignored.
    Players(Vec<PlayerId>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerReaction {
    pub player: PlayerId,
    pub shift: MeterShift,
}

/// Outcome of one processed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventReport {
    pub event: TeamEvent,
    pub reactions: Vec<PlayerReaction>,
    pub decisions: Vec<CoachDecision>,
    pub chemistry: i32,
    pub culture_level: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clubhouse {
    team: Team,
    coach: Coach,
    tuning: Tuning,
    reports: Vec<EventReport>,
}

impl Clubhouse {
    /// Start with an empty roster whose metric weights come from `tuning`.
    /// The tuning is validated first.
    pub fn new(coach: Coach, tuning: Tuning) -> Result<Self, ClubhouseError> {
        tuning.validate()?;
        Ok(Self {
            team: Team::with_weights(tuning.team),
            coach,
            tuning,
            reports: Vec::new(),
        })
    }

    /// Start with tuning loaded from a TOML file.
    pub fn load<P: AsRef<Path>>(coach: Coach, tuning_path: P) -> Result<Self, ClubhouseError> {
        Self::new(coach, Tuning::from_file(tuning_path)?)
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    pub fn coach(&self) -> &Coach {
        &self.coach
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Every processed event, oldest first.
    pub fn reports(&self) -> &[EventReport] {
        &self.reports
    }

    /// Create a player from the tuning's starting meters.
    pub fn create_player(
        &self,
        name: impl Into<String>,
        position: impl Into<String>,
        rating: i32,
    ) -> RulesResult<Player> {
        Player::with_defaults(name, position, rating, &self.tuning.player)
    }

    /// Put `player` on the roster and refresh the team metrics.
    pub fn sign(&mut self, player: Player) -> RulesResult<PlayerId> {
        let id = self.team.add_player(player)?;
        self.refresh_metrics();
        Ok(id)
    }

    fn resolve(&self, affected: &Affected) -> RulesResult<Vec<PlayerId>> {
        match affected {
            Affected::All => Ok(self.team.player_ids()),
            Affected::Players(ids) => {
                let mut targets = Vec::with_capacity(ids.len());
                for id in ids {
                    if !self.team.contains(*id) {
                        return Err(RulesError::UnknownPlayer(*id));
                    }
                    if !targets.contains(id) {
                        targets.push(*id);
                    }
                }
                Ok(targets)
            }
        }
    }

    fn refresh_metrics(&mut self) {
        self.team.update_culture();
        self.team.evaluate_performance();
    }

    /// Run the full cascade for `event`: player reactions, the coach's
    /// response, then a metric refresh.
    ///
    /// Targets and the event type are checked up front, so a failing call
    /// changes nothing.
    pub fn process_event(
        &mut self,
        event: TeamEvent,
        affected: Affected,
    ) -> RulesResult<EventReport> {
        let targets = self.resolve(&affected)?;
        if self.tuning.event_profile(event.event_type()).is_none() {
            log::warn!("no profile for event type {}", event.event_type());
            return Err(RulesError::UnknownEventType(event.event_type().to_string()));
        }

        let mut reactions = Vec::with_capacity(targets.len());
        for id in &targets {
            let player = self.team.player_mut(*id).ok_or(RulesError::UnknownPlayer(*id))?;
            let shift = event.affect_player(player, &self.tuning)?;
            reactions.push(PlayerReaction { player: *id, shift });
        }

        let mut decisions = Vec::new();
        if event.trigger_decision() {
            for id in &targets {
                if let Some(player) = self.team.player_mut(*id) {
                    decisions.extend(self.coach.handle_event(&event, [player], &self.tuning));
                }
            }
        }

        self.refresh_metrics();
        log::info!(
            "{} processed for {} player(s): chemistry {}, culture {}",
            event,
            targets.len(),
            self.team.chemistry(),
            self.team.culture_level()
        );

        let report = EventReport {
            event,
            reactions,
            decisions,
            chemistry: self.team.chemistry(),
            culture_level: self.team.culture_level(),
        };
        self.reports.push(report.clone());
        Ok(report)
    }

    /// Run a training session for the whole roster.
    pub fn train_squad(&mut self) {
        for player in self.team.players_mut() {
            player.train(&self.tuning);
        }
        self.refresh_metrics();
    }

    /// Send the listed players out for a match. Returns those it exhausted.
    pub fn play_match(&mut self, lineup: &[PlayerId]) -> RulesResult<Vec<PlayerId>> {
        let targets = self.resolve(&Affected::Players(lineup.to_vec()))?;

        let mut exhausted = Vec::new();
        for id in targets {
            if let Some(player) = self.team.player_mut(id) {
                if player.play(&self.tuning) {
                    exhausted.push(id);
                }
            }
        }
        self.refresh_metrics();
        Ok(exhausted)
    }

    /// Routine coach check-in with one player.
    pub fn check_in(&mut self, id: PlayerId) -> RulesResult<Option<DisciplinaryAction>> {
        let player = self.team.player_mut(id).ok_or(RulesError::UnknownPlayer(id))?;
        let action = self.coach.manage_player(player, &self.tuning);
        if action.is_some() {
            self.refresh_metrics();
        }
        Ok(action)
    }
}
