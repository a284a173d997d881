//! Data-driven decision table for coach responses.
//!
//! Lookup order is fixed: the crisis check runs first, then rules are tried
//! top to bottom, then the style's default action applies.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use team_rules::{
    ActionType, ConfigError, DisciplineStyle, EventType, Morale, TeamEvent, SEVERITY_RANGE,
    TREND_LIMIT,
};

fn default_min_severity() -> i32 {
    1
}

/// One row of the decision table. `None` fields match anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRule {
    #[serde(default)]
    pub style: Option<DisciplineStyle>,
    #[serde(default)]
    pub event: Option<EventType>,
    /// Lowest event severity this row applies to.
    #[serde(default = "default_min_severity")]
    pub min_severity: i32,
    /// Row applies only while the player's morale trend is at or below this.
    #[serde(default)]
    pub max_trend: Option<i32>,
    pub action: ActionType,
}

impl DecisionRule {
    pub fn new(style: Option<DisciplineStyle>, event: EventType, action: ActionType) -> Self {
        Self {
            style,
            event: Some(event),
            min_severity: 1,
            max_trend: None,
            action,
        }
    }

    pub fn at_severity(mut self, min_severity: i32) -> Self {
        self.min_severity = min_severity;
        self
    }

    pub fn while_trend_at_most(mut self, max_trend: i32) -> Self {
        self.max_trend = Some(max_trend);
        self
    }

    pub fn matches(&self, style: DisciplineStyle, event: &TeamEvent, trend: i32) -> bool {
        self.style.map_or(true, |s| s == style)
            && self.event.map_or(true, |e| e == event.event_type())
            && event.severity() >= self.min_severity
            && self.max_trend.map_or(true, |max| trend <= max)
    }
}

/// Why a particular action was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionBasis {
    /// Sustained morale decline preempted the table.
    Crisis,
    /// Matched the rule at this index.
    Rule(usize),
    /// Nothing matched; the style's default applied.
    StyleDefault,
    /// Routine check-in outside any event.
    CheckIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub action: ActionType,
    pub basis: DecisionBasis,
}

/// Crisis threshold plus ordered decision rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionTable {
    /// A player whose morale trend stayed at or below this for two
    /// consecutive updates is in crisis and gets a morale boost instead of
    /// punishment.
    pub crisis_trend: i32,
    pub rules: Vec<DecisionRule>,
}

impl Default for DecisionTable {
    fn default() -> Self {
        use ActionType::*;
        use DisciplineStyle::*;
        use EventType::*;

        Self {
            crisis_trend: -3,
            rules: vec![
                DecisionRule::new(Some(Strict), Conflict, Benching).at_severity(6),
                DecisionRule::new(Some(Strict), Conflict, FineOrPenalty),
                DecisionRule::new(Some(Balanced), Conflict, Benching).at_severity(8),
                DecisionRule::new(Some(Balanced), Conflict, Warning),
                DecisionRule::new(Some(Lenient), Conflict, Warning),
                DecisionRule::new(Some(Strict), PublicCriticism, FineOrPenalty).at_severity(5),
                DecisionRule::new(Some(Lenient), PublicCriticism, MoraleBoostTalk),
                DecisionRule::new(None, PublicCriticism, Warning),
                DecisionRule::new(Some(Strict), Loss, Warning).at_severity(7),
                DecisionRule::new(None, Loss, MoraleBoostTalk).while_trend_at_most(-1),
                DecisionRule::new(Some(Strict), Loss, Warning),
                DecisionRule::new(None, Loss, MoraleBoostTalk),
                DecisionRule::new(None, Injury, MoraleBoostTalk),
                DecisionRule::new(None, Win, MoraleBoostTalk),
                DecisionRule::new(None, Milestone, MoraleBoostTalk),
            ],
        }
    }
}

impl DecisionTable {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let table: DecisionTable = toml::from_str(content)?;
        table.validate()?;
        Ok(table)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-TREND_LIMIT..=TREND_LIMIT).contains(&self.crisis_trend) {
            return Err(ConfigError::Validation(format!(
                "crisis_trend {} outside [-{TREND_LIMIT}, {TREND_LIMIT}]",
                self.crisis_trend
            )));
        }
        for (index, rule) in self.rules.iter().enumerate() {
            if !SEVERITY_RANGE.contains(&rule.min_severity) {
                return Err(ConfigError::Validation(format!(
                    "rule {index}: min_severity {} outside [1, 10]",
                    rule.min_severity
                )));
            }
        }
        Ok(())
    }

    pub fn is_crisis(&self, morale: &Morale) -> bool {
        morale.in_crisis(self.crisis_trend)
    }

    pub fn decide(&self, style: DisciplineStyle, event: &TeamEvent, morale: &Morale) -> Decision {
        if self.is_crisis(morale) {
            return Decision {
                action: ActionType::MoraleBoostTalk,
                basis: DecisionBasis::Crisis,
            };
        }

        self.rules
            .iter()
            .position(|rule| rule.matches(style, event, morale.trend()))
            .map(|index| Decision {
                action: self.rules[index].action,
                basis: DecisionBasis::Rule(index),
            })
            .unwrap_or(Decision {
                action: style.default_action(),
                basis: DecisionBasis::StyleDefault,
            })
    }
}
