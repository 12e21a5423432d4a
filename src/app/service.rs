//! Controller service — the hexagonal core.
//!
//! [`Controller`] owns the [`PolicyState`] and exposes the two entry
//! points the control loop dispatches to: applying an operator command
//! and running one evaluation cycle. All I/O flows through port traits
//! injected at call sites.
//!
//! ```text
//!  TemperatureProbe ──▶ ┌──────────────────────┐ ──▶ FeedbackSink
//!                       │      Controller       │
//!          FanPort ◀────│  PolicyState · decide │
//!                       └──────────────────────┘
//! ```

use log::{info, warn};

use crate::control::hysteresis::decide;
use crate::error::{Error, Result};
use crate::policy::PolicyState;

use super::commands::Command;
use super::events::ControllerEvent;
use super::ports::{FanPort, FeedbackSink, TemperatureProbe};

/// Owns the policy and applies commands and evaluation cycles to it.
pub struct Controller {
    policy: PolicyState,
}

impl Controller {
    pub fn new(policy: PolicyState) -> Self {
        Self { policy }
    }

    /// Announce the initial mode to the operator.
    pub fn start(&self, sink: &mut impl FeedbackSink) {
        sink.emit(&ControllerEvent::Started {
            mode: self.policy.mode(),
        });
        info!("controller started in {} mode", self.policy.mode());
    }

    /// Read access to the live policy (the control loop needs the
    /// current poll interval).
    pub fn policy(&self) -> &PolicyState {
        &self.policy
    }

    // ── Command application ───────────────────────────────────

    /// Apply one parsed operator command.
    ///
    /// Mode changes always succeed; threshold and interval changes route
    /// through the validated setters, and a rejection leaves the policy
    /// unchanged. Exactly one probe read happens for `temp`, none
    /// otherwise.
    pub fn handle_command(
        &mut self,
        command: Command,
        probe: &mut impl TemperatureProbe,
        sink: &mut impl FeedbackSink,
    ) {
        match command {
            Command::SetMode(mode) => {
                self.policy.set_mode(mode);
                info!("mode set to {mode}");
                sink.emit(&ControllerEvent::ModeChanged(mode));
            }
            Command::QueryTemperature => match probe.read_temperature() {
                Ok(t) => sink.emit(&ControllerEvent::Temperature(t)),
                Err(e) => sink.emit(&ControllerEvent::ProbeFailed(e)),
            },
            Command::SetOnThreshold(value) => {
                match self.policy.set_on_threshold(value as f32) {
                    Ok(()) => sink.emit(&ControllerEvent::OnThresholdChanged(value as f32)),
                    Err(reason) => sink.emit(&ControllerEvent::CommandRejected { reason }),
                }
            }
            Command::SetOffThreshold(value) => {
                match self.policy.set_off_threshold(value as f32) {
                    Ok(()) => sink.emit(&ControllerEvent::OffThresholdChanged(value as f32)),
                    Err(reason) => sink.emit(&ControllerEvent::CommandRejected { reason }),
                }
            }
            Command::SetPollInterval(value) => {
                match self.policy.set_poll_interval(value as f32) {
                    Ok(()) => sink.emit(&ControllerEvent::PollIntervalChanged(value as f32)),
                    Err(reason) => sink.emit(&ControllerEvent::CommandRejected { reason }),
                }
            }
            Command::Help => sink.emit(&ControllerEvent::Help),
            Command::Unknown(raw) => sink.emit(&ControllerEvent::UnknownCommand(raw)),
        }
    }

    // ── Evaluation cycle ──────────────────────────────────────

    /// One sense → decide → actuate cycle.
    ///
    /// A probe failure skips the cycle without touching the fan and is
    /// not an error; an inverted policy is fatal and aborts before any
    /// actuator command is issued. At most one actuation per cycle.
    pub fn evaluate(
        &mut self,
        probe: &mut impl TemperatureProbe,
        fan: &mut impl FanPort,
        sink: &mut impl FeedbackSink,
    ) -> Result<()> {
        self.policy.validate().map_err(Error::Policy)?;

        let temperature_c = match probe.read_temperature() {
            Ok(t) => t,
            Err(e) => {
                warn!("temperature read failed, skipping cycle: {e}");
                sink.emit(&ControllerEvent::EvaluationSkipped(e));
                return Ok(());
            }
        };

        let fan_on = fan.is_on();
        let desired = decide(&self.policy, temperature_c, fan_on);
        if desired != fan_on {
            fan.set_fan(desired);
            info!(
                "fan {} at {temperature_c:.1}\u{00b0}C",
                if desired { "on" } else { "off" }
            );
            sink.emit(&ControllerEvent::FanChanged(desired));
        }
        Ok(())
    }
}
