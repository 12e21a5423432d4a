//! fanctld — main entry point.
//!
//! Wires the controller core to the deployment adapters:
//!
//! ```text
//!  stdin ──▶ reader thread ──▶ channel ──▶ ┌─────────────┐
//!                                          │ ControlLoop │──▶ FanPort (GPIO / sim)
//!  TemperatureProbe (vcgencmd / sysfs) ──▶ └─────────────┘──▶ FeedbackSink (console)
//! ```

#![deny(unused_must_use)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use fanctld::adapters::console::{ConsoleFeedbackSink, spawn_stdin_reader};
use fanctld::adapters::gpio::{GpioFan, SysfsPin};
use fanctld::adapters::sim::SimulatedFan;
use fanctld::adapters::thermal::ThermalZoneProbe;
use fanctld::adapters::vcgencmd::VcgencmdProbe;
use fanctld::app::ports::{FanPort, TemperatureProbe};
use fanctld::app::service::Controller;
use fanctld::config::FanConfig;
use fanctld::policy::PolicyState;
use fanctld::runtime::ControlLoop;

// ── CLI ───────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "fanctld",
    version,
    about = "Interactive thermal hysteresis fan controller"
)]
struct Cli {
    /// JSON config file (defaults are used when absent)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fan GPIO pin (BCM numbering), overrides the config file
    #[arg(long)]
    pin: Option<u32>,

    /// On threshold in degrees Celsius, overrides the config file
    #[arg(long)]
    on: Option<f32>,

    /// Off threshold in degrees Celsius, overrides the config file
    #[arg(long)]
    off: Option<f32>,

    /// Seconds between temperature checks, overrides the config file
    #[arg(long)]
    interval: Option<f32>,

    /// Temperature probe backend
    #[arg(long, value_enum, default_value = "vcgencmd")]
    probe: ProbeKind,

    /// Drive an in-memory fan instead of the GPIO line
    #[arg(long)]
    simulate: bool,

    /// Disable colored operator feedback
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProbeKind {
    /// `vcgencmd measure_temp` (Raspberry Pi firmware)
    Vcgencmd,
    /// `/sys/class/thermal/thermal_zone<N>/temp`
    Thermal,
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // ── 1. Configuration: file, then flag overrides ───────────
    let mut config =
        FanConfig::load_or_default(cli.config.as_deref()).context("loading configuration")?;
    if let Some(pin) = cli.pin {
        config.gpio_pin = pin;
    }
    if let Some(on) = cli.on {
        config.on_threshold_c = on;
    }
    if let Some(off) = cli.off {
        config.off_threshold_c = off;
    }
    if let Some(interval) = cli.interval {
        config.poll_interval_secs = interval;
    }

    // An inverted threshold pair is refused before the loop ever runs.
    let policy = PolicyState::from_config(&config).context("invalid policy configuration")?;

    println!("fanctld v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' to list commands. Ctrl+C stops the controller.");

    // ── 2. Interrupt handling: raise a flag, let the loop exit ─
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
        .context("installing interrupt handler")?;

    // ── 3. Adapters ───────────────────────────────────────────
    let mut probe: Box<dyn TemperatureProbe> = match cli.probe {
        ProbeKind::Vcgencmd => Box::new(VcgencmdProbe::new()),
        ProbeKind::Thermal => Box::new(ThermalZoneProbe::new(config.thermal_zone)),
    };
    let mut fan: Box<dyn FanPort> = if cli.simulate {
        info!("driving a simulated fan, no GPIO access");
        Box::new(SimulatedFan::new())
    } else {
        let pin = SysfsPin::new(config.gpio_pin)
            .with_context(|| format!("exporting GPIO pin {}", config.gpio_pin))?;
        Box::new(GpioFan::new(pin, config.active_high))
    };
    let mut sink = ConsoleFeedbackSink::new(!cli.no_color);

    // ── 4. Run until stdin closes or the operator interrupts ──
    let lines = spawn_stdin_reader();
    let controller = Controller::new(policy);
    controller.start(&mut sink);

    let mut control_loop = ControlLoop::new(controller, lines, shutdown);
    control_loop
        .run(&mut probe, &mut fan, &mut sink)
        .context("control loop failed")?;

    Ok(())
}
