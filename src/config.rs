// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Compiled-in configuration.
//!
//! Nothing is persisted: every boot starts from these values.

use crate::{Error, Result};

/// Capacity of the receive line buffer in bytes.
pub const RX_BUF_SIZE: usize = 64;

/// Completed lines held for the main loop. A CRLF-terminated command occupies two slots.
pub const RX_LINE_QUEUE: usize = 8;

/// PWM frequency applied at boot.
pub const DEFAULT_FREQ_HZ: u32 = 20_000;
pub const MIN_FREQ_HZ: u32 = 1_000;
pub const MAX_FREQ_HZ: u32 = 50_000;

/// Duty values are percentages.
pub const MAX_DUTY: u8 = 100;
pub const DEFAULT_DUTY: u8 = 50;

/// Interval between two ramp steps.
pub const DUTY_STEP_DELAY_MS: u32 = 20;

/// TIM1 dead-time generator setting (DTG field of BDTR).
pub const DEAD_TIME_TICKS: u8 = 40;

pub const BAUD_RATE: u32 = 115_200;

/// What a frequency change does with the output enable state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RestartPolicy {
    /// Always restart the outputs after reprogramming the period, even if they were stopped.
    Always,
    /// Restart only if the outputs were running before the change.
    Resume,
}

/// Controller parameters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ControllerConfig {
    pub default_frequency_hz: u32,
    pub min_frequency_hz: u32,
    pub max_frequency_hz: u32,
    /// Duty written (and targeted) at boot, in percent.
    pub initial_duty: u8,
    pub ramp_interval_ms: u32,
    pub dead_time_ticks: u8,
    pub restart_policy: RestartPolicy,
    /// Enable the outputs as part of [`Controller::boot`](crate::controller::Controller::boot).
    pub start_on_boot: bool,
    pub baud_rate: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            default_frequency_hz: DEFAULT_FREQ_HZ,
            min_frequency_hz: MIN_FREQ_HZ,
            max_frequency_hz: MAX_FREQ_HZ,
            initial_duty: DEFAULT_DUTY,
            ramp_interval_ms: DUTY_STEP_DELAY_MS,
            dead_time_ticks: DEAD_TIME_TICKS,
            restart_policy: RestartPolicy::Always,
            start_on_boot: true,
            baud_rate: BAUD_RATE,
        }
    }
}

impl ControllerConfig {
    /// Check internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.min_frequency_hz == 0 || self.min_frequency_hz > self.max_frequency_hz {
            return Err(Error::Config("frequency range is empty"));
        }
        if !self.frequency_in_range(self.default_frequency_hz) {
            return Err(Error::Config("default frequency outside range"));
        }
        if self.initial_duty > MAX_DUTY {
            return Err(Error::Config("initial duty above 100%"));
        }
        if self.ramp_interval_ms == 0 {
            return Err(Error::Config("ramp interval must be non-zero"));
        }
        Ok(())
    }

    #[inline]
    pub fn frequency_in_range(&self, freq_hz: u32) -> bool {
        (self.min_frequency_hz..=self.max_frequency_hz).contains(&freq_hz)
    }
}
