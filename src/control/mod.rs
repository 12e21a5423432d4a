//! Control algorithms — pure decision logic, zero I/O.

pub mod hysteresis;
