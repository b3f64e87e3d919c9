// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! PWM control facade.
//!
//! [`PwmController`] owns the live PWM state and the hardware backend, and is the only place where
//! either is mutated. All three channels mirror one duty value.
//!
//! Changing the frequency of a running generator goes through a safe state: the outputs are
//! disabled, the new period and recomputed pulse widths are programmed, then the outputs are
//! enabled again.

use core::fmt::Write;

use crate::config::{ControllerConfig, RestartPolicy, MAX_DUTY};
use crate::protocol::write_reply;
use crate::{Error, Result};

/// One of the three timer channels. Each drives a primary and a complementary output.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Channel {
    Ch1,
    Ch2,
    Ch3,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Ch1, Channel::Ch2, Channel::Ch3];
}

/// Register-level PWM generator. Every call takes effect before it returns.
pub trait PwmBackend {
    /// Counter clock feeding the generator, in Hz.
    fn clock_hz(&self) -> u32;

    /// Program the auto-reload (period) register.
    fn set_period(&mut self, period: u32);

    /// Program one channel's compare (pulse) register.
    fn set_compare(&mut self, channel: Channel, pulse: u32);

    /// Enable primary and complementary outputs on all channels.
    fn enable_outputs(&mut self);

    /// Disable all outputs.
    fn disable_outputs(&mut self);
}

/// Snapshot of the controller state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PwmState {
    /// Duty currently programmed into the compare registers, in percent.
    pub duty_now: u8,
    /// Duty the ramp is moving toward, in percent.
    pub duty_target: u8,
    pub enabled: bool,
    pub frequency_hz: u32,
}

/// Period (ARR) value for `freq_hz` with an undivided counter clock.
#[inline]
pub fn period_for(clock_hz: u32, freq_hz: u32) -> u32 {
    (clock_hz / freq_hz.max(1)).saturating_sub(1)
}

/// Compare value for `duty` percent of `period`, truncated.
#[inline]
pub fn pulse_for(duty: u8, period: u32) -> u32 {
    (u64::from(period) * u64::from(duty.min(MAX_DUTY)) / 100) as u32
}

pub struct PwmController<B: PwmBackend> {
    backend: B,
    state: PwmState,
    period: u32,
    config: ControllerConfig,
}

impl<B: PwmBackend> PwmController<B> {
    /// Take ownership of the backend and program the default period. Outputs stay disabled.
    pub fn new(mut backend: B, config: &ControllerConfig) -> Self {
        let period = period_for(backend.clock_hz(), config.default_frequency_hz);
        backend.disable_outputs();
        backend.set_period(period);

        Self {
            backend,
            state: PwmState {
                duty_now: config.initial_duty,
                duty_target: config.initial_duty,
                enabled: false,
                frequency_hz: config.default_frequency_hz,
            },
            period,
            config: *config,
        }
    }

    /// Enable all outputs. Safe to call while already running.
    pub fn start<W: Write>(&mut self, out: &mut W) {
        self.backend.enable_outputs();
        if !self.state.enabled {
            log::info!("pwm outputs enabled");
        }
        self.state.enabled = true;
        write_reply(out, format_args!("PWM START"));
    }

    /// Disable all outputs. Safe to call while already stopped.
    pub fn stop<W: Write>(&mut self, out: &mut W) {
        self.backend.disable_outputs();
        if self.state.enabled {
            log::info!("pwm outputs disabled");
        }
        self.state.enabled = false;
        write_reply(out, format_args!("PWM STOP"));
    }

    /// Write `duty` percent (clamped to 100) to all channels and make it the live duty.
    pub fn set_duty(&mut self, duty: u8) {
        let duty = duty.min(MAX_DUTY);
        let pulse = pulse_for(duty, self.period);
        for ch in Channel::ALL {
            self.backend.set_compare(ch, pulse);
        }
        self.state.duty_now = duty;
    }

    /// Set the ramp target, clamped to [0, 100]. Returns the stored value.
    pub fn set_target(&mut self, duty: i32) -> u8 {
        let target = duty.clamp(0, i32::from(MAX_DUTY)) as u8;
        self.state.duty_target = target;
        target
    }

    /// Reprogram the generator for `freq_hz`, keeping the current duty percentage.
    ///
    /// Out-of-range requests leave everything untouched.
    pub fn set_frequency<W: Write>(&mut self, freq_hz: u32, out: &mut W) -> Result<u32> {
        if !self.config.frequency_in_range(freq_hz) {
            log::warn!("rejected pwm frequency {} Hz", freq_hz);
            return Err(Error::FrequencyOutOfRange { requested: freq_hz });
        }

        let was_enabled = self.state.enabled;
        let period = period_for(self.backend.clock_hz(), freq_hz);

        self.stop(out);
        self.backend.set_period(period);
        self.period = period;
        self.set_duty(self.state.duty_now);

        let restart = match self.config.restart_policy {
            RestartPolicy::Always => true,
            RestartPolicy::Resume => was_enabled,
        };
        if restart {
            self.start(out);
        }

        self.state.frequency_hz = freq_hz;
        log::info!("pwm frequency {} Hz, period {}", freq_hz, period);
        Ok(freq_hz)
    }

    #[inline]
    pub fn state(&self) -> PwmState {
        self.state
    }

    /// Currently programmed period (ARR) value.
    #[inline]
    pub fn period(&self) -> u32 {
        self.period
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
