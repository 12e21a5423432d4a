//! Console transport: the stdin reader thread and colored feedback.
//!
//! The reader thread is the only place that blocks on stdin; the control
//! loop sees lines through a channel with a bounded wait. Dropping the
//! sender on EOF is the loop's normal termination signal.

use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use colored::Colorize;

use crate::app::events::ControllerEvent;
use crate::app::ports::FeedbackSink;

/// Spawn a detached thread forwarding stdin lines to a channel.
pub fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                // Loop side hung up first; nothing left to do.
                break;
            }
        }
    });
    rx
}

// ───────────────────────────────────────────────────────────────
// Feedback rendering
// ───────────────────────────────────────────────────────────────

const HELP_TEXT: &str = "\
Commands: on (fan always on)
          off (fan always off)
          auto (follow temperature, default)
          temp (read the temperature now)
          max=<deg> (on threshold, default 65)
          min=<deg> (off threshold, default 55)
          sleep=<secs> (seconds between temperature checks, default 5)
          help (show this text)";

enum Severity {
    Notice,
    Error,
    Plain,
}

fn render(event: &ControllerEvent) -> (String, Severity) {
    match event {
        ControllerEvent::Started { mode } => (
            format!("Fan controller started in {mode} mode"),
            Severity::Notice,
        ),
        ControllerEvent::ModeChanged(mode) => (format!("Mode set to {mode}"), Severity::Notice),
        ControllerEvent::Temperature(t) => {
            (format!("Temperature: {t:.1}\u{00b0}C"), Severity::Notice)
        }
        ControllerEvent::ProbeFailed(e) => (format!("Temperature unavailable: {e}"), Severity::Error),
        ControllerEvent::OnThresholdChanged(v) => (
            format!("On threshold value changed to {v}"),
            Severity::Notice,
        ),
        ControllerEvent::OffThresholdChanged(v) => (
            format!("Off threshold value changed to {v}"),
            Severity::Notice,
        ),
        ControllerEvent::PollIntervalChanged(v) => (
            format!("Sleep interval value changed to {v}"),
            Severity::Notice,
        ),
        ControllerEvent::CommandRejected { reason } => {
            (format!("Rejected: {reason}"), Severity::Error)
        }
        ControllerEvent::UnknownCommand(raw) => (
            format!("Unknown command '{raw}', type 'help' to list commands."),
            Severity::Error,
        ),
        ControllerEvent::Help => (HELP_TEXT.to_string(), Severity::Plain),
        ControllerEvent::FanChanged(on) => (
            format!("Fan switched {}", if *on { "on" } else { "off" }),
            Severity::Notice,
        ),
        ControllerEvent::EvaluationSkipped(e) => (
            format!("Temperature unavailable, check skipped: {e}"),
            Severity::Error,
        ),
    }
}

/// Renders every controller event as one console line.
pub struct ConsoleFeedbackSink {
    color: bool,
}

impl ConsoleFeedbackSink {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl FeedbackSink for ConsoleFeedbackSink {
    fn emit(&mut self, event: &ControllerEvent) {
        let (line, severity) = render(event);
        if !self.color {
            println!("{line}");
            return;
        }
        match severity {
            Severity::Notice => println!("{}", line.yellow()),
            Severity::Error => println!("{}", line.red()),
            Severity::Plain => println!("{line}"),
        }
    }
}
