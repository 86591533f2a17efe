//! Runner configuration.

use serde::{Deserialize, Serialize};

use crate::error::RunnerError;

/// Tuning for a [`Runner`](crate::Runner) and the drivers that tick it.
///
/// Missing JSON fields fall back to their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Largest delta, in seconds, fed into a single tick. Longer gaps (a
    /// backgrounded tab, a debugger pause) are clamped to this.
    pub max_delta_time: f64,
    /// Sleep between ticks for [`TimerDriver::run_until`](crate::TimerDriver::run_until).
    pub tick_interval_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_delta_time: 1.0,
            tick_interval_ms: 16,
        }
    }
}

impl RunnerConfig {
    /// Parses and validates a config from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, RunnerError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RunnerError> {
        if !(self.max_delta_time > 0.0 && self.max_delta_time.is_finite()) {
            return Err(RunnerError::Config {
                reason: format!("max_delta_time must be > 0, got {}", self.max_delta_time),
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(RunnerError::Config {
                reason: "tick_interval_ms must be > 0".into(),
            });
        }
        Ok(())
    }

    /// `max_delta_time` in milliseconds, the unit drivers receive timestamps in.
    #[inline]
    pub fn max_delta_ms(&self) -> f64 {
        self.max_delta_time * 1000.0
    }
}
