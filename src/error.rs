//! Unified error types for the fan controller.
//!
//! A single top-level `Error` that every subsystem converts into, keeping
//! the control loop's error handling uniform. Probe failures are recoverable
//! per call site; an inverted policy detected at evaluation time is not.

use std::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the controller funnels into this type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The temperature could not be read or parsed.
    Probe(ProbeError),
    /// The control policy is invalid or was rejected.
    Policy(PolicyError),
    /// Configuration could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Probe(e) => write!(f, "probe: {e}"),
            Self::Policy(e) => write!(f, "policy: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Probe errors
// ---------------------------------------------------------------------------

/// The temperature probe failed to produce a reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The measurement utility could not be spawned.
    Spawn(String),
    /// The measurement utility produced non-UTF-8 output.
    Utf8,
    /// The response did not contain a parseable temperature.
    Parse(String),
    /// Reading the sensor backend failed at the I/O level.
    Io(String),
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(detail) => write!(f, "could not run measurement utility: {detail}"),
            Self::Utf8 => write!(f, "measurement output is not UTF-8"),
            Self::Parse(raw) => write!(f, "could not parse temperature from {raw:?}"),
            Self::Io(detail) => write!(f, "sensor read failed: {detail}"),
        }
    }
}

impl std::error::Error for ProbeError {}

impl From<ProbeError> for Error {
    fn from(e: ProbeError) -> Self {
        Self::Probe(e)
    }
}

// ---------------------------------------------------------------------------
// Policy errors
// ---------------------------------------------------------------------------

/// A rejected policy mutation, or an ill-formed policy caught at
/// evaluation time.
///
/// The rejection variants carry the conflicting value so operator
/// feedback can name it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolicyError {
    /// `set_on_threshold` would put the on threshold at or below the
    /// off threshold.
    InvalidOnThreshold { value: f32, off_threshold: f32 },
    /// `set_off_threshold` would put the off threshold at or above the
    /// on threshold.
    InvalidOffThreshold { value: f32, on_threshold: f32 },
    /// Poll interval must be positive.
    InvalidInterval(f32),
    /// The thresholds are inverted. Detected at evaluation time, this is
    /// fatal: the loop must not actuate under an ill-defined policy.
    Inverted { on: f32, off: f32 },
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOnThreshold {
                value,
                off_threshold,
            } => write!(
                f,
                "on threshold {value} must be above the off threshold ({off_threshold})"
            ),
            Self::InvalidOffThreshold {
                value,
                on_threshold,
            } => write!(
                f,
                "off threshold {value} must be below the on threshold ({on_threshold})"
            ),
            Self::InvalidInterval(value) => {
                write!(f, "poll interval {value} must be greater than zero")
            }
            Self::Inverted { on, off } => write!(
                f,
                "off threshold ({off}) must be below on threshold ({on})"
            ),
        }
    }
}

impl std::error::Error for PolicyError {}

impl From<PolicyError> for Error {
    fn from(e: PolicyError) -> Self {
        Self::Policy(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, Error>;
