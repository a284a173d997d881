//! The team aggregate: sole owner of its players and of the derived
//! chemistry and culture metrics.

use serde::{Deserialize, Serialize};

use crate::config::TeamWeights;
use crate::entities::{Player, PlayerId};
use crate::error::{RulesError, RulesResult};

/// Upper bound for chemistry and culture.
pub const METRIC_MAX: i32 = 100;

/// A roster plus the metrics derived from it.
///
/// `chemistry` and `culture_level` are caches: they reflect the roster as of
/// the last [`evaluate_performance`](Self::evaluate_performance) and
/// [`update_culture`](Self::update_culture) calls and are recomputed from
/// scratch each time.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Team {
    players: Vec<Player>,
    chemistry: i32,
    culture_level: i32,
    weights: TeamWeights,
}

impl Team {
    /// Create an empty team with default weights.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: TeamWeights) -> Self {
        Self {
            weights,
            ..Self::default()
        }
    }

    pub fn weights(&self) -> &TeamWeights {
        &self.weights
    }

    /// Take ownership of `player`. Names must be unique on the roster.
    pub fn add_player(&mut self, player: Player) -> RulesResult<PlayerId> {
        if self.player_by_name(player.name()).is_some() {
            log::warn!("rejected duplicate roster name {:?}", player.name());
            return Err(RulesError::DuplicateName(player.name().to_string()));
        }
        let id = player.id();
        log::info!("{} joined the roster as {}", player.name(), player.position());
        self.players.push(player);
        Ok(id)
    }

    pub fn team_size(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.player(id).is_some()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id() == id)
    }

    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name() == name)
    }

    /// Players in the order they joined.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(Player::id).collect()
    }

    pub fn chemistry(&self) -> i32 {
        self.chemistry
    }

    pub fn culture_level(&self) -> i32 {
        self.culture_level
    }

    /// Recompute culture from the morale distribution: mean morale minus a
    /// penalty proportional to its standard deviation.
    pub fn update_culture(&mut self) -> i32 {
        self.culture_level = match morale_stats(&self.players) {
            None => 0,
            Some((mean, std_dev)) => {
                let penalty = self.weights.culture_spread_penalty as f64 * std_dev;
                clamp_metric(mean - penalty)
            }
        };
        log::debug!("culture recomputed: {}", self.culture_level);
        self.culture_level
    }

    /// Recompute chemistry as a weighted blend of average focus (as a share
    /// of each player's max) and average morale.
    pub fn evaluate_performance(&mut self) -> i32 {
        self.chemistry = if self.players.is_empty() {
            0
        } else {
            let count = self.players.len() as f64;
            let focus = self.players.iter().map(|p| p.focus().percent()).sum::<f64>() / count;
            let morale = self
                .players
                .iter()
                .map(|p| p.current_morale() as f64)
                .sum::<f64>()
                / count;
            let w = &self.weights;
            let total = (w.chemistry_focus_weight + w.chemistry_morale_weight) as f64;
            if total <= 0.0 {
                0
            } else {
                let blended = w.chemistry_focus_weight as f64 * focus
                    + w.chemistry_morale_weight as f64 * morale;
                clamp_metric(blended / total)
            }
        };
        log::debug!("chemistry recomputed: {}", self.chemistry);
        self.chemistry
    }
}

/// Mean and population standard deviation of roster morale.
fn morale_stats(players: &[Player]) -> Option<(f64, f64)> {
    if players.is_empty() {
        return None;
    }
    let count = players.len() as f64;
    let mean = players.iter().map(|p| p.current_morale() as f64).sum::<f64>() / count;
    let variance = players
        .iter()
        .map(|p| {
            let d = p.current_morale() as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / count;
    Some((mean, variance.sqrt()))
}

fn clamp_metric(value: f64) -> i32 {
    (value.round() as i32).clamp(0, METRIC_MAX)
}
