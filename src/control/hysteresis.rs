//! Two-threshold hysteresis decision engine.
//!
//! The dead band between the off and on thresholds is where no transition
//! happens, which is what keeps the fan from flapping around a single
//! setpoint. Equality with a threshold never triggers a transition.

use crate::policy::{Mode, PolicyState};

/// Decide the desired fan state from the policy, the sensed temperature,
/// and the observed fan state.
///
/// Pure function: the caller owns all probe and actuator I/O.
pub fn decide(policy: &PolicyState, temperature_c: f32, fan_on: bool) -> bool {
    match policy.mode() {
        Mode::ForcedOn => true,
        Mode::ForcedOff => false,
        Mode::Auto => {
            if !fan_on && temperature_c > policy.on_threshold_c() {
                true
            } else if fan_on && temperature_c < policy.off_threshold_c() {
                false
            } else {
                // Dead band: hold the current state.
                fan_on
            }
        }
    }
}
