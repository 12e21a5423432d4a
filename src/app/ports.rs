//! Port traits — the boundary between the controller core and the world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Adapters (the GPIO line, the measurement utility, the console)
//! implement these traits. The controller consumes them via generics and
//! never touches hardware directly, so the whole core runs against mocks.

use super::events::ControllerEvent;
use crate::error::ProbeError;

// ───────────────────────────────────────────────────────────────
// Temperature probe (driven adapter: sensor → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: yields the current temperature in degrees Celsius.
pub trait TemperatureProbe {
    fn read_temperature(&mut self) -> Result<f32, ProbeError>;
}

// ───────────────────────────────────────────────────────────────
// Fan (driven adapter: domain → actuator)
// ───────────────────────────────────────────────────────────────

/// Write-side port: a binary actuator with readable commanded state.
///
/// Device-level failures are out of scope, so there is no error channel.
pub trait FanPort {
    /// Command the fan. Idempotent: commanding the current state is a no-op.
    fn set_fan(&mut self, on: bool);

    /// The last commanded state.
    fn is_on(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Feedback sink (driven adapter: domain → operator)
// ───────────────────────────────────────────────────────────────

/// The controller emits structured [`ControllerEvent`]s through this port.
/// Adapters decide the rendering (colored console, plain log, ...).
pub trait FeedbackSink {
    fn emit(&mut self, event: &ControllerEvent);
}

// ───────────────────────────────────────────────────────────────
// Boxed forwarding impls, so `main` can pick adapters at runtime
// ───────────────────────────────────────────────────────────────

impl TemperatureProbe for Box<dyn TemperatureProbe> {
    fn read_temperature(&mut self) -> Result<f32, ProbeError> {
        (**self).read_temperature()
    }
}

impl FanPort for Box<dyn FanPort> {
    fn set_fan(&mut self, on: bool) {
        (**self).set_fan(on);
    }

    fn is_on(&self) -> bool {
        (**self).is_on()
    }
}
