//! fanctld library.
//!
//! Exposes the pure-logic modules (policy, hysteresis decision, command
//! grammar, controller, control loop) for integration testing; the binary
//! wires them to the Raspberry Pi adapters.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod policy;
pub mod runtime;
