//! Startup configuration.
//!
//! Defaults match the reference deployment (on at 65, off at 55, a check
//! every 5 seconds, fan on BCM pin 17). An optional JSON file overrides
//! them; runtime changes made through operator commands are deliberately
//! never written back.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Everything tunable at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FanConfig {
    /// Temperature at which AUTO mode turns the fan on (Celsius).
    pub on_threshold_c: f32,
    /// Temperature at which AUTO mode turns the fan off (Celsius).
    pub off_threshold_c: f32,
    /// Minimum spacing between evaluation ticks (seconds).
    pub poll_interval_secs: f32,
    /// BCM pin number driving the fan.
    pub gpio_pin: u32,
    /// Whether driving the pin high turns the fan on.
    pub active_high: bool,
    /// Which sysfs thermal zone the `thermal` probe reads.
    pub thermal_zone: u32,
}

impl Default for FanConfig {
    fn default() -> Self {
        Self {
            on_threshold_c: 65.0,
            off_threshold_c: 55.0,
            poll_interval_secs: 5.0,
            gpio_pin: 17,
            active_high: true,
            thermal_zone: 0,
        }
    }
}

impl FanConfig {
    /// Read `path` as JSON. No path, or a path that does not exist yet,
    /// yields the defaults; a present-but-broken file is an error rather
    /// than a silent fallback.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("config {} not found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                warn!("cannot read config {}: {e}", path.display());
                return Err(Error::Config("config file unreadable"));
            }
        };
        let config = serde_json::from_str(&text).map_err(|e| {
            warn!("config {} is not valid JSON: {e}", path.display());
            Error::Config("config file is not valid JSON")
        })?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }
}
