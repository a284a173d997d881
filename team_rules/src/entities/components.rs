//! Bounded meters owned by a player.

use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};

/// Upper bound of the universal morale scale.
pub const MORALE_MAX: i32 = 100;

/// Bound on the magnitude of the morale trend accumulator.
pub const TREND_LIMIT: i32 = 5;

/// In-the-moment concentration, saturating in `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusMeter {
    current: i32,
    max: i32,
}

impl FocusMeter {
    /// Create a full meter.
    pub fn new(max: i32) -> RulesResult<Self> {
        Self::with_level(max, max)
    }

    /// Create a meter at a specific starting level.
    pub fn with_level(max: i32, current: i32) -> RulesResult<Self> {
        if max < 0 {
            return Err(RulesError::InvalidArgument(format!(
                "focus max must be >= 0, got {max}"
            )));
        }
        if !(0..=max).contains(&current) {
            return Err(RulesError::InvalidArgument(format!(
                "focus level {current} outside [0, {max}]"
            )));
        }
        Ok(Self { current, max })
    }

    pub fn increase(&mut self, amount: i32) -> RulesResult<()> {
        Self::check_amount(amount)?;
        self.current = self.current.saturating_add(amount).clamp(0, self.max);
        Ok(())
    }

    pub fn decrease(&mut self, amount: i32) -> RulesResult<()> {
        Self::check_amount(amount)?;
        self.current = self.current.saturating_sub(amount).clamp(0, self.max);
        Ok(())
    }

    /// Apply a signed delta. Cannot fail: the sign picks the direction.
    pub(crate) fn shift(&mut self, delta: i32) {
        self.current = self.current.saturating_add(delta).clamp(0, self.max);
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Current level as a percentage of max; an empty-capacity meter reads 0.
    pub fn percent(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f64 * 100.0 / self.max as f64
        }
    }

    fn check_amount(amount: i32) -> RulesResult<()> {
        if amount < 0 {
            return Err(RulesError::InvalidArgument(format!(
                "focus amount must be >= 0, got {amount}"
            )));
        }
        Ok(())
    }
}

/// Sustained emotional state on a fixed `[0, 100]` scale, with momentum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Morale {
    current: i32,
    /// Running sum of delta signs, bounded to `[-TREND_LIMIT, TREND_LIMIT]`.
    trend: i32,
    /// Trend before the most recent application.
    previous_trend: i32,
    applications: u32,
}

impl Morale {
    pub fn new(initial: i32) -> RulesResult<Self> {
        if !(0..=MORALE_MAX).contains(&initial) {
            return Err(RulesError::InvalidArgument(format!(
                "morale {initial} outside [0, {MORALE_MAX}]"
            )));
        }
        Ok(Self {
            current: initial,
            trend: 0,
            previous_trend: 0,
            applications: 0,
        })
    }

    pub fn apply(&mut self, delta: i32) {
        self.current = self.current.saturating_add(delta).clamp(0, MORALE_MAX);
        self.previous_trend = self.trend;
        self.trend = (self.trend + delta.signum()).clamp(-TREND_LIMIT, TREND_LIMIT);
        self.applications = self.applications.saturating_add(1);
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn trend(&self) -> i32 {
        self.trend
    }

    /// True when the trend sat at or below `threshold` after each of the
    /// last two applications.
    pub fn in_crisis(&self, threshold: i32) -> bool {
        self.applications >= 2 && self.trend <= threshold && self.previous_trend <= threshold
    }
}

impl Default for Morale {
    fn default() -> Self {
        Self {
            current: 50,
            trend: 0,
            previous_trend: 0,
            applications: 0,
        }
    }
}
