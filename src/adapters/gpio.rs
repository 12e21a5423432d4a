//! Fan output line over `embedded-hal` digital pins.
//!
//! [`GpioFan`] adapts any [`StatefulOutputPin`] to the [`FanPort`] port
//! with active-high or active-low wiring. [`SysfsPin`] is the Raspberry
//! Pi deployment pin, driven through the legacy sysfs GPIO interface so
//! the daemon needs nothing beyond `/sys/class/gpio` access.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin, StatefulOutputPin};
use log::warn;

use crate::app::ports::FanPort;

// ───────────────────────────────────────────────────────────────
// GpioFan
// ───────────────────────────────────────────────────────────────

/// Binary fan on a digital output line.
///
/// Tracks the commanded state itself; `is_on` reflects the last command,
/// not a read-back of the line.
pub struct GpioFan<P: StatefulOutputPin> {
    pin: P,
    active_high: bool,
    is_on: bool,
}

impl<P: StatefulOutputPin> GpioFan<P> {
    /// Take ownership of the line and drive it to a known off state.
    pub fn new(pin: P, active_high: bool) -> Self {
        let mut fan = Self {
            pin,
            active_high,
            is_on: false,
        };
        fan.drive(false);
        fan
    }

    fn drive(&mut self, on: bool) {
        let result = if on == self.active_high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        // Device failures are out of scope for the control loop; the
        // commanded state stays authoritative.
        if let Err(e) = result {
            warn!("fan pin write failed: {e:?}");
        }
    }
}

impl<P: StatefulOutputPin> FanPort for GpioFan<P> {
    fn set_fan(&mut self, on: bool) {
        if on == self.is_on {
            return;
        }
        self.drive(on);
        self.is_on = on;
    }

    fn is_on(&self) -> bool {
        self.is_on
    }
}

// ───────────────────────────────────────────────────────────────
// SysfsPin
// ───────────────────────────────────────────────────────────────

/// An exported sysfs GPIO configured as an output.
pub struct SysfsPin {
    value_path: PathBuf,
    level: bool,
}

/// I/O failure while driving the sysfs value file.
#[derive(Debug)]
pub struct SysfsPinError(io::Error);

impl embedded_hal::digital::Error for SysfsPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl SysfsPin {
    /// Export `pin` (BCM numbering) and configure it as an output.
    pub fn new(pin: u32) -> io::Result<Self> {
        let base = PathBuf::from("/sys/class/gpio");
        let dir = base.join(format!("gpio{pin}"));
        if !dir.exists() {
            fs::write(base.join("export"), pin.to_string())?;
            // The kernel needs a moment to create the node and udev to
            // fix up permissions.
            thread::sleep(Duration::from_millis(100));
        }
        fs::write(dir.join("direction"), "out")?;
        Ok(Self {
            value_path: dir.join("value"),
            level: false,
        })
    }
}

impl ErrorType for SysfsPin {
    type Error = SysfsPinError;
}

impl OutputPin for SysfsPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        fs::write(&self.value_path, "0").map_err(SysfsPinError)?;
        self.level = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        fs::write(&self.value_path, "1").map_err(SysfsPinError)?;
        self.level = true;
        Ok(())
    }
}

impl StatefulOutputPin for SysfsPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level)
    }
}
