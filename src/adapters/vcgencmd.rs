//! Temperature probe backed by the Broadcom `vcgencmd` utility.
//!
//! The firmware tool answers `vcgencmd measure_temp` with a line of the
//! shape `temp=48.3'C`. That parse contract is load-bearing for
//! compatibility with the utility; other backends live behind the same
//! port (see [`thermal`](super::thermal)).

use std::process::Command;
use std::str;

use crate::app::ports::TemperatureProbe;
use crate::error::ProbeError;

/// Probe that shells out to `vcgencmd measure_temp` on every read.
#[derive(Debug, Default)]
pub struct VcgencmdProbe;

impl VcgencmdProbe {
    pub fn new() -> Self {
        Self
    }
}

impl TemperatureProbe for VcgencmdProbe {
    fn read_temperature(&mut self) -> Result<f32, ProbeError> {
        let output = Command::new("vcgencmd")
            .arg("measure_temp")
            .output()
            .map_err(|e| ProbeError::Spawn(e.to_string()))?;
        let text = str::from_utf8(&output.stdout).map_err(|_| ProbeError::Utf8)?;
        parse_measure_temp(text)
    }
}

/// Parse the `temp=<number>'C` response shape.
pub fn parse_measure_temp(text: &str) -> Result<f32, ProbeError> {
    let after_eq = text
        .split_once('=')
        .map(|(_, rest)| rest)
        .ok_or_else(|| ProbeError::Parse(text.trim().to_string()))?;
    let number = match after_eq.split_once('\'') {
        Some((number, _)) => number,
        None => after_eq,
    };
    number
        .trim()
        .parse::<f32>()
        .map_err(|_| ProbeError::Parse(text.trim().to_string()))
}
