//! Control policy: thresholds, poll cadence, and operating mode.
//!
//! [`PolicyState`] is the single owned instance of all runtime-tunable
//! configuration. It is mutated only through validated setters, which is
//! where the threshold-ordering invariant (`off < on`) is enforced; a
//! rejected mutation leaves the state untouched.

use std::fmt;
use std::time::Duration;

use crate::config::FanConfig;
use crate::error::PolicyError;

/// Operating mode of the actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Fan state follows the hysteresis decision.
    Auto,
    /// Operator override: fan always on, temperature ignored.
    ForcedOn,
    /// Operator override: fan always off, temperature ignored.
    ForcedOff,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "AUTO"),
            Self::ForcedOn => write!(f, "ON"),
            Self::ForcedOff => write!(f, "OFF"),
        }
    }
}

/// The mutable control policy.
///
/// Invariant: `off_threshold_c < on_threshold_c` and
/// `poll_interval_secs > 0` hold at all times after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyState {
    on_threshold_c: f32,
    off_threshold_c: f32,
    poll_interval_secs: f32,
    mode: Mode,
}

impl Default for PolicyState {
    fn default() -> Self {
        Self {
            on_threshold_c: 65.0,
            off_threshold_c: 55.0,
            poll_interval_secs: 5.0,
            mode: Mode::Auto,
        }
    }
}

impl PolicyState {
    /// Build the startup policy from configuration, refusing an inverted
    /// threshold pair or a non-positive interval before the loop ever runs.
    pub fn from_config(config: &FanConfig) -> Result<Self, PolicyError> {
        if config.poll_interval_secs <= 0.0 {
            return Err(PolicyError::InvalidInterval(config.poll_interval_secs));
        }
        let state = Self {
            on_threshold_c: config.on_threshold_c,
            off_threshold_c: config.off_threshold_c,
            poll_interval_secs: config.poll_interval_secs,
            mode: Mode::Auto,
        };
        state.validate()?;
        Ok(state)
    }

    // ── Getters ───────────────────────────────────────────────

    pub fn on_threshold_c(&self) -> f32 {
        self.on_threshold_c
    }

    pub fn off_threshold_c(&self) -> f32 {
        self.off_threshold_c
    }

    pub fn poll_interval_secs(&self) -> f32 {
        self.poll_interval_secs
    }

    /// Poll interval as a [`Duration`] for the control loop's timer math.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs_f32(self.poll_interval_secs)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    // ── Validated setters ─────────────────────────────────────

    /// Raise or lower the on threshold. Rejected if it would not stay
    /// strictly above the off threshold.
    pub fn set_on_threshold(&mut self, value: f32) -> Result<(), PolicyError> {
        if value <= self.off_threshold_c {
            return Err(PolicyError::InvalidOnThreshold {
                value,
                off_threshold: self.off_threshold_c,
            });
        }
        self.on_threshold_c = value;
        Ok(())
    }

    /// Raise or lower the off threshold. Rejected if it would not stay
    /// strictly below the on threshold.
    pub fn set_off_threshold(&mut self, value: f32) -> Result<(), PolicyError> {
        if value >= self.on_threshold_c {
            return Err(PolicyError::InvalidOffThreshold {
                value,
                on_threshold: self.on_threshold_c,
            });
        }
        self.off_threshold_c = value;
        Ok(())
    }

    /// Change the spacing between evaluation ticks. Must be positive.
    pub fn set_poll_interval(&mut self, value: f32) -> Result<(), PolicyError> {
        if value <= 0.0 {
            return Err(PolicyError::InvalidInterval(value));
        }
        self.poll_interval_secs = value;
        Ok(())
    }

    /// Mode changes always succeed.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    // ── Evaluation-time guard ─────────────────────────────────

    /// Re-check the threshold ordering. The setters make a violation
    /// unreachable through this API; this guards any path that bypasses
    /// them. An `Inverted` result is fatal to the caller.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.off_threshold_c >= self.on_threshold_c {
            return Err(PolicyError::Inverted {
                on: self.on_threshold_c,
                off: self.off_threshold_c,
            });
        }
        Ok(())
    }
}
