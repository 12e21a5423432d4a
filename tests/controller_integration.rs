//! Integration tests: command grammar → Controller → fan, and the
//! control loop's input/tick merging, all against mock ports.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use fanctld::app::commands;
use fanctld::app::events::ControllerEvent;
use fanctld::app::ports::{FanPort, FeedbackSink, TemperatureProbe};
use fanctld::app::service::Controller;
use fanctld::config::FanConfig;
use fanctld::error::{PolicyError, ProbeError};
use fanctld::policy::{Mode, PolicyState};
use fanctld::runtime::ControlLoop;

// ── Mock ports ────────────────────────────────────────────────

/// Probe that replays a scripted sequence of readings.
struct ScriptedProbe {
    script: VecDeque<Result<f32, ProbeError>>,
    reads: usize,
}

impl ScriptedProbe {
    fn new(script: Vec<Result<f32, ProbeError>>) -> Self {
        Self {
            script: script.into(),
            reads: 0,
        }
    }

    fn steady(temperature_c: f32) -> Self {
        Self::new(vec![Ok(temperature_c); 1000])
    }
}

impl TemperatureProbe for ScriptedProbe {
    fn read_temperature(&mut self) -> Result<f32, ProbeError> {
        self.reads += 1;
        self.script
            .pop_front()
            .unwrap_or_else(|| Err(ProbeError::Io("script exhausted".to_string())))
    }
}

/// Fan that records every command it receives.
struct RecordingFan {
    on: bool,
    calls: Vec<bool>,
}

impl RecordingFan {
    fn starting(on: bool) -> Self {
        Self {
            on,
            calls: Vec::new(),
        }
    }
}

impl FanPort for RecordingFan {
    fn set_fan(&mut self, on: bool) {
        self.calls.push(on);
        self.on = on;
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

struct RecordingSink {
    events: Vec<ControllerEvent>,
}

impl RecordingSink {
    fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl FeedbackSink for RecordingSink {
    fn emit(&mut self, event: &ControllerEvent) {
        self.events.push(event.clone());
    }
}

fn controller() -> Controller {
    Controller::new(PolicyState::default())
}

fn apply(c: &mut Controller, line: &str, probe: &mut ScriptedProbe, sink: &mut RecordingSink) {
    let command = commands::parse(line).expect("line should parse to a command");
    c.handle_command(command, probe, sink);
}

// ── Evaluation scenarios ──────────────────────────────────────

#[test]
fn hot_reading_turns_fan_on() {
    let mut c = controller();
    let mut probe = ScriptedProbe::new(vec![Ok(70.0)]);
    let mut fan = RecordingFan::starting(false);
    let mut sink = RecordingSink::new();

    c.evaluate(&mut probe, &mut fan, &mut sink).unwrap();

    assert_eq!(fan.calls, vec![true]);
    assert!(sink.events.contains(&ControllerEvent::FanChanged(true)));
}

#[test]
fn dead_band_reading_keeps_fan_on() {
    let mut c = controller();
    let mut probe = ScriptedProbe::new(vec![Ok(60.0)]);
    let mut fan = RecordingFan::starting(true);
    let mut sink = RecordingSink::new();

    c.evaluate(&mut probe, &mut fan, &mut sink).unwrap();

    assert!(fan.calls.is_empty(), "no actuation inside the dead band");
    assert!(fan.is_on());
}

#[test]
fn cold_reading_turns_fan_off() {
    let mut c = controller();
    let mut probe = ScriptedProbe::new(vec![Ok(50.0)]);
    let mut fan = RecordingFan::starting(true);
    let mut sink = RecordingSink::new();

    c.evaluate(&mut probe, &mut fan, &mut sink).unwrap();

    assert_eq!(fan.calls, vec![false]);
}

#[test]
fn probe_failure_skips_cycle_then_recovers() {
    let mut c = controller();
    let mut probe = ScriptedProbe::new(vec![Err(ProbeError::Parse("garbage".to_string())), Ok(70.0)]);
    let mut fan = RecordingFan::starting(false);
    let mut sink = RecordingSink::new();

    // Failed cycle: no actuator call, loop carries on.
    c.evaluate(&mut probe, &mut fan, &mut sink).unwrap();
    assert!(fan.calls.is_empty());
    assert!(matches!(
        sink.events.as_slice(),
        [ControllerEvent::EvaluationSkipped(_)]
    ));

    // Next cycle works normally.
    c.evaluate(&mut probe, &mut fan, &mut sink).unwrap();
    assert_eq!(fan.calls, vec![true]);
}

#[test]
fn forced_on_overrides_a_cold_reading() {
    let mut c = controller();
    let mut probe = ScriptedProbe::steady(20.0);
    let mut fan = RecordingFan::starting(false);
    let mut sink = RecordingSink::new();

    apply(&mut c, "on", &mut probe, &mut sink);
    c.evaluate(&mut probe, &mut fan, &mut sink).unwrap();

    assert_eq!(fan.calls, vec![true]);

    // Back to auto: 20 degrees is below the off threshold, fan stops.
    apply(&mut c, "auto", &mut probe, &mut sink);
    c.evaluate(&mut probe, &mut fan, &mut sink).unwrap();
    assert_eq!(fan.calls, vec![true, false]);
}

// ── Command application scenarios ─────────────────────────────

#[test]
fn conflicting_on_threshold_is_rejected_with_named_value() {
    let mut c = controller();
    let mut probe = ScriptedProbe::steady(60.0);
    let mut sink = RecordingSink::new();

    apply(&mut c, "max=50", &mut probe, &mut sink);

    assert_eq!(
        sink.events,
        vec![ControllerEvent::CommandRejected {
            reason: PolicyError::InvalidOnThreshold {
                value: 50.0,
                off_threshold: 55.0,
            },
        }]
    );
    assert_eq!(c.policy().on_threshold_c(), 65.0, "policy unchanged");
}

#[test]
fn sequential_threshold_moves_that_are_each_valid() {
    let mut c = controller();
    let mut probe = ScriptedProbe::steady(60.0);
    let mut sink = RecordingSink::new();

    apply(&mut c, "min=40", &mut probe, &mut sink);
    apply(&mut c, "max=45", &mut probe, &mut sink);

    assert_eq!(c.policy().off_threshold_c(), 40.0);
    assert_eq!(c.policy().on_threshold_c(), 45.0);
    assert_eq!(
        sink.events,
        vec![
            ControllerEvent::OffThresholdChanged(40.0),
            ControllerEvent::OnThresholdChanged(45.0),
        ]
    );
}

#[test]
fn temp_command_reads_the_probe_exactly_once() {
    let mut c = controller();
    let mut probe = ScriptedProbe::new(vec![Ok(48.3)]);
    let mut sink = RecordingSink::new();

    apply(&mut c, "temp", &mut probe, &mut sink);

    assert_eq!(probe.reads, 1);
    assert_eq!(sink.events, vec![ControllerEvent::Temperature(48.3)]);
}

#[test]
fn unknown_command_echoes_and_changes_nothing() {
    let mut c = controller();
    let mut probe = ScriptedProbe::steady(60.0);
    let mut sink = RecordingSink::new();
    let before = c.policy().clone();

    apply(&mut c, "spin faster", &mut probe, &mut sink);

    assert_eq!(
        sink.events,
        vec![ControllerEvent::UnknownCommand("spin faster".to_string())]
    );
    assert_eq!(c.policy(), &before);
    assert_eq!(probe.reads, 0);
}

#[test]
fn zero_sleep_is_rejected() {
    let mut c = controller();
    let mut probe = ScriptedProbe::steady(60.0);
    let mut sink = RecordingSink::new();

    apply(&mut c, "sleep=0", &mut probe, &mut sink);

    assert_eq!(
        sink.events,
        vec![ControllerEvent::CommandRejected {
            reason: PolicyError::InvalidInterval(0.0),
        }]
    );
    assert_eq!(c.policy().poll_interval_secs(), 5.0);
}

// ── Control loop ──────────────────────────────────────────────

#[test]
fn loop_applies_queued_lines_then_stops_on_eof() {
    let (tx, rx) = mpsc::channel();
    tx.send("on".to_string()).unwrap();
    tx.send("   ".to_string()).unwrap(); // blank, skipped silently
    tx.send("max=70".to_string()).unwrap();
    drop(tx); // EOF

    let shutdown = Arc::new(AtomicBool::new(false));
    let mut control_loop = ControlLoop::new(controller(), rx, shutdown);
    let mut probe = ScriptedProbe::steady(60.0);
    let mut fan = RecordingFan::starting(false);
    let mut sink = RecordingSink::new();

    control_loop.run(&mut probe, &mut fan, &mut sink).unwrap();

    let policy = control_loop.controller().policy();
    assert_eq!(policy.mode(), Mode::ForcedOn);
    assert_eq!(policy.on_threshold_c(), 70.0);
    assert_eq!(
        sink.events,
        vec![
            ControllerEvent::ModeChanged(Mode::ForcedOn),
            ControllerEvent::OnThresholdChanged(70.0),
        ]
    );
}

#[test]
fn loop_evaluates_on_the_poll_cadence() {
    // Short interval so the test sees a few ticks quickly.
    let config = FanConfig {
        poll_interval_secs: 0.05,
        ..FanConfig::default()
    };
    let policy = PolicyState::from_config(&config).unwrap();

    let (tx, rx) = mpsc::channel::<String>();
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);

    let handle = thread::spawn(move || {
        let mut control_loop = ControlLoop::new(Controller::new(policy), rx, flag);
        let mut probe = ScriptedProbe::steady(70.0);
        let mut fan = RecordingFan::starting(false);
        let mut sink = RecordingSink::new();
        let result = control_loop.run(&mut probe, &mut fan, &mut sink);
        (result, fan, probe.reads)
    });

    // Keep the sender alive so the loop idles on the timeout branch.
    thread::sleep(Duration::from_millis(500));
    shutdown.store(true, Ordering::Relaxed);
    let (result, fan, reads) = handle.join().unwrap();
    drop(tx);

    assert!(result.is_ok());
    assert!(reads >= 1, "at least one evaluation should have run");
    assert_eq!(fan.calls, vec![true], "fan commanded on exactly once");
}

#[test]
fn shutdown_flag_stops_an_idle_loop() {
    let (tx, rx) = mpsc::channel::<String>();
    let shutdown = Arc::new(AtomicBool::new(true)); // already raised

    let mut control_loop = ControlLoop::new(controller(), rx, shutdown);
    let mut probe = ScriptedProbe::steady(60.0);
    let mut fan = RecordingFan::starting(false);
    let mut sink = RecordingSink::new();

    control_loop.run(&mut probe, &mut fan, &mut sink).unwrap();
    drop(tx);

    assert!(fan.calls.is_empty());
    assert_eq!(probe.reads, 0);
}
