//! Team events and their dispatch to players.

use serde::{Deserialize, Serialize};

use super::EventType;
use crate::config::Tuning;
use crate::entities::{MeterShift, Player, SEVERITY_RANGE};
use crate::error::{RulesError, RulesResult};

/// Something that happened to the team, with a severity in `[1, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamEvent {
    event_type: EventType,
    severity: i32,
}

impl TeamEvent {
    pub fn new(event_type: EventType, severity: i32) -> RulesResult<Self> {
        if !SEVERITY_RANGE.contains(&severity) {
            return Err(RulesError::InvalidArgument(format!(
                "severity must be within [1, 10], got {severity}"
            )));
        }
        Ok(Self {
            event_type,
            severity,
        })
    }

    /// Build an event from a type name, failing with `UnknownEventType`.
    pub fn parse(event_type: &str, severity: i32) -> RulesResult<Self> {
        Self::new(event_type.parse()?, severity)
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn severity(&self) -> i32 {
        self.severity
    }

    /// Let `player` react to this event.
    pub fn affect_player(&self, player: &mut Player, tuning: &Tuning) -> RulesResult<MeterShift> {
        player.react_to_event(self.event_type, self.severity, tuning)
    }

    /// Whether the coach should be asked for a response. Choosing and
    /// applying that response is the coach's job.
    pub fn trigger_decision(&self) -> bool {
        self.event_type.is_coach_relevant()
    }
}

impl std::fmt::Display for TeamEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (severity {})", self.event_type, self.severity)
    }
}
