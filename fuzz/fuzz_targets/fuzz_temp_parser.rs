//! Fuzz the `temp=<number>'C` response parser: arbitrary utility output
//! must yield a reading or a typed error, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = fanctld::adapters::vcgencmd::parse_measure_temp(text);
    }
});
