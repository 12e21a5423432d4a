//! Outbound controller events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`FeedbackSink`](super::ports::FeedbackSink) port. Adapters decide how
//! they are rendered — one colored console line each in the reference
//! deployment.

use crate::error::{PolicyError, ProbeError};
use crate::policy::Mode;

/// Structured events emitted by the controller core.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    /// The controller has started (carries the initial mode).
    Started { mode: Mode },

    /// The operating mode changed.
    ModeChanged(Mode),

    /// A `temp` query succeeded.
    Temperature(f32),

    /// A `temp` query failed.
    ProbeFailed(ProbeError),

    /// The on threshold was changed.
    OnThresholdChanged(f32),

    /// The off threshold was changed.
    OffThresholdChanged(f32),

    /// The poll interval was changed.
    PollIntervalChanged(f32),

    /// A configuration command was rejected; the reason names the
    /// conflicting value.
    CommandRejected { reason: PolicyError },

    /// Input that did not parse as any command, echoed back.
    UnknownCommand(String),

    /// The operator asked for the usage summary.
    Help,

    /// The fan was commanded to a new state.
    FanChanged(bool),

    /// A scheduled evaluation was skipped because the probe failed.
    EvaluationSkipped(ProbeError),
}
