//! Temperature probe over the Linux sysfs thermal zone interface.
//!
//! `/sys/class/thermal/thermal_zone<N>/temp` reports millidegrees
//! Celsius. Works on any Linux SoC without the Broadcom firmware tools.

use std::fs;
use std::path::PathBuf;

use crate::app::ports::TemperatureProbe;
use crate::error::ProbeError;

/// Probe that reads a sysfs thermal zone on every read.
#[derive(Debug)]
pub struct ThermalZoneProbe {
    path: PathBuf,
}

impl ThermalZoneProbe {
    pub fn new(zone: u32) -> Self {
        Self {
            path: PathBuf::from(format!("/sys/class/thermal/thermal_zone{zone}/temp")),
        }
    }

    /// Read from an arbitrary file with the same millidegree format.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TemperatureProbe for ThermalZoneProbe {
    fn read_temperature(&mut self) -> Result<f32, ProbeError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| ProbeError::Io(e.to_string()))?;
        let millidegrees: i64 = raw
            .trim()
            .parse()
            .map_err(|_| ProbeError::Parse(raw.trim().to_string()))?;
        Ok(millidegrees as f32 / 1000.0)
    }
}
