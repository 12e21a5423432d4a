//! The control loop: one thread, two event sources.
//!
//! Operator lines arrive on a channel fed by a detached stdin reader;
//! evaluation ticks are derived from elapsed wall-clock time. Merging
//! both onto a single cooperative loop means no two operations ever touch
//! the policy or the fan concurrently, at the cost of input latency
//! bounded by [`INPUT_POLL_TIMEOUT`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use log::debug;

use crate::app::commands;
use crate::app::ports::{FanPort, FeedbackSink, TemperatureProbe};
use crate::app::service::Controller;
use crate::error::Result;

/// Upper bound on one wait for operator input. Smaller means snappier
/// commands and more wakeups; larger means more input latency. This is a
/// compile-time tunable, not operator-configurable.
pub const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Single-threaded event loop owning the controller and the input channel.
pub struct ControlLoop {
    controller: Controller,
    lines: Receiver<String>,
    shutdown: Arc<AtomicBool>,
    last_evaluation: Instant,
}

impl ControlLoop {
    pub fn new(controller: Controller, lines: Receiver<String>, shutdown: Arc<AtomicBool>) -> Self {
        Self {
            controller,
            lines,
            shutdown,
            last_evaluation: Instant::now(),
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Run until operator input is exhausted (stdin EOF), the shutdown
    /// flag is raised by the interrupt handler, or an evaluation finds
    /// the policy inverted. The first two return `Ok` silently.
    pub fn run(
        &mut self,
        probe: &mut impl TemperatureProbe,
        fan: &mut impl FanPort,
        sink: &mut impl FeedbackSink,
    ) -> Result<()> {
        loop {
            if self.shutdown.load(Ordering::Relaxed) {
                debug!("shutdown flag raised, leaving control loop");
                return Ok(());
            }

            match self.lines.recv_timeout(INPUT_POLL_TIMEOUT) {
                Ok(line) => {
                    self.handle_line(&line, probe, sink);
                    // Drain whatever else queued up while we were busy.
                    while let Ok(queued) = self.lines.try_recv() {
                        self.handle_line(&queued, probe, sink);
                    }
                    // Operator interaction counts as activity; the next
                    // evaluation waits a full interval from here.
                    self.last_evaluation = Instant::now();
                }
                Err(RecvTimeoutError::Timeout) => {
                    if self.last_evaluation.elapsed() > self.controller.policy().poll_interval() {
                        self.controller.evaluate(probe, fan, sink)?;
                        // Advances even when the cycle was skipped, so a
                        // failing probe is not retried in a tight loop.
                        self.last_evaluation = Instant::now();
                    }
                }
                // Reader thread dropped the sender: stdin is exhausted.
                Err(RecvTimeoutError::Disconnected) => {
                    debug!("operator input closed, leaving control loop");
                    return Ok(());
                }
            }
        }
    }

    fn handle_line(
        &mut self,
        line: &str,
        probe: &mut impl TemperatureProbe,
        sink: &mut impl FeedbackSink,
    ) {
        // Blank lines parse to nothing and are skipped silently.
        if let Some(command) = commands::parse(line) {
            self.controller.handle_command(command, probe, sink);
        }
    }
}
