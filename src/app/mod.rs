//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules of the fan controller: the
//! command grammar, the policy-owning [`service::Controller`], and the
//! structured events it emits. All interaction with hardware happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without a probe or a fan attached.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
