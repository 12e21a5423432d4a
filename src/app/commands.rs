//! Operator command grammar.
//!
//! One command per console line. Matching is case-insensitive with
//! surrounding whitespace trimmed; unrecognised input becomes a distinct
//! [`Command::Unknown`] variant instead of being silently dropped.

use crate::policy::Mode;

/// A parsed operator command, immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `on` / `off` / `auto`.
    SetMode(Mode),
    /// `temp` — read and report the temperature right now.
    QueryTemperature,
    /// `max=<deg>` — new on threshold.
    SetOnThreshold(i32),
    /// `min=<deg>` — new off threshold.
    SetOffThreshold(i32),
    /// `sleep=<secs>` — new poll interval.
    SetPollInterval(i32),
    /// `help` — usage summary.
    Help,
    /// Anything else, carrying the raw text for the feedback message.
    Unknown(String),
}

/// Parse one line of operator input. Returns `None` for a blank line.
pub fn parse(raw: &str) -> Option<Command> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_lowercase();

    let command = match lower.as_str() {
        "on" => Command::SetMode(Mode::ForcedOn),
        "off" => Command::SetMode(Mode::ForcedOff),
        "auto" => Command::SetMode(Mode::Auto),
        "temp" => Command::QueryTemperature,
        _ => {
            if let Some((key, value)) = lower.split_once('=') {
                // Assignment syntax is checked before the `help` fallback,
                // so `help=1` is unknown rather than a help request.
                parse_assignment(key, value)
                    .unwrap_or_else(|| Command::Unknown(trimmed.to_string()))
            } else if lower.contains("help") {
                Command::Help
            } else {
                Command::Unknown(trimmed.to_string())
            }
        }
    };
    Some(command)
}

/// `key=value` commands. A right-hand side that does not parse as an
/// integer makes the whole line unknown.
fn parse_assignment(key: &str, value: &str) -> Option<Command> {
    let n: i32 = value.trim().parse().ok()?;
    if key.contains("max") {
        Some(Command::SetOnThreshold(n))
    } else if key.contains("min") {
        Some(Command::SetOffThreshold(n))
    } else if key.contains("sleep") {
        Some(Command::SetPollInterval(n))
    } else {
        None
    }
}
