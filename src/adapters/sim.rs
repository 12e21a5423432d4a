//! In-memory stand-ins for bench runs without fan hardware.

use log::info;

use crate::app::ports::{FanPort, TemperatureProbe};
use crate::error::ProbeError;

/// Fan that only logs its transitions. Used by `--simulate`.
#[derive(Debug, Default)]
pub struct SimulatedFan {
    on: bool,
}

impl SimulatedFan {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FanPort for SimulatedFan {
    fn set_fan(&mut self, on: bool) {
        if on != self.on {
            info!("[sim] fan -> {}", if on { "ON" } else { "OFF" });
            self.on = on;
        }
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

/// Probe returning a fixed reading, or failing every read.
#[derive(Debug)]
pub struct FixedProbe {
    temperature_c: Option<f32>,
}

impl FixedProbe {
    pub fn new(temperature_c: f32) -> Self {
        Self {
            temperature_c: Some(temperature_c),
        }
    }

    /// A probe with nothing to report.
    pub fn failing() -> Self {
        Self {
            temperature_c: None,
        }
    }

    pub fn set(&mut self, temperature_c: f32) {
        self.temperature_c = Some(temperature_c);
    }
}

impl TemperatureProbe for FixedProbe {
    fn read_temperature(&mut self) -> Result<f32, ProbeError> {
        self.temperature_c
            .ok_or_else(|| ProbeError::Io("no reading available".to_string()))
    }
}
