// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control
//!
//! ## Modules
//!
//! - [`pwm`] - PWM control facade over a register-level [`PwmBackend`].
//! - [`ramp`] - Fixed-cadence linear duty ramp.

pub mod pwm;
pub mod ramp;

pub use pwm::{Channel, PwmBackend, PwmController, PwmState};
pub use ramp::RampScheduler;
