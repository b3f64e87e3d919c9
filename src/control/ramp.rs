// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Linear duty ramp: one percent per step, one step per interval.

use core::cmp::Ordering;

use crate::control::pwm::{PwmBackend, PwmController};

/// Moves the live duty toward the target. Call [`poll`](Self::poll) on every main loop iteration.
pub struct RampScheduler {
    interval_ms: u32,
    last_step_ms: u32,
}

impl RampScheduler {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_step_ms: 0,
        }
    }

    /// Run one scheduler pass at tick `now_ms`.
    ///
    /// Once the interval has elapsed the duty moves one step toward the target through
    /// [`PwmController::set_duty`]. Returns the new duty when a step was taken.
    pub fn poll<B: PwmBackend>(&mut self, now_ms: u32, pwm: &mut PwmController<B>) -> Option<u8> {
        if now_ms.wrapping_sub(self.last_step_ms) < self.interval_ms {
            return None;
        }
        self.last_step_ms = now_ms;

        let state = pwm.state();
        let next = match state.duty_now.cmp(&state.duty_target) {
            Ordering::Less => state.duty_now + 1,
            Ordering::Greater => state.duty_now - 1,
            Ordering::Equal => return None,
        };
        pwm.set_duty(next);

        if next == state.duty_target {
            log::debug!("duty ramp reached {}%", next);
        }
        Some(next)
    }
}
