//! Fuzz the operator command grammar: arbitrary console lines must parse
//! to some `Command` (or nothing) without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        let _ = fanctld::app::commands::parse(line);
    }
});
