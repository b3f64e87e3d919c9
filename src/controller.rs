// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command interpreter and main-loop state.
//!
//! [`Controller`] owns the PWM facade and the ramp scheduler. The main loop hands it every
//! completed line via [`process_line`](Controller::process_line) and the current tick via
//! [`poll`](Controller::poll). Replies go to any `core::fmt::Write` sink (the UART console on the
//! board).

use core::fmt::Write;

use crate::config::ControllerConfig;
use crate::control::{PwmBackend, PwmController, PwmState, RampScheduler};
use crate::protocol::messages::{BANNER, LINE_END};
use crate::protocol::{parse_line, write_reply, Command};
use crate::{Error, Result};

pub struct Controller<B: PwmBackend> {
    pwm: PwmController<B>,
    ramp: RampScheduler,
    initial_duty: u8,
    start_on_boot: bool,
}

impl<B: PwmBackend> Controller<B> {
    pub fn new(backend: B, config: &ControllerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pwm: PwmController::new(backend, config),
            ramp: RampScheduler::new(config.ramp_interval_ms),
            initial_duty: config.initial_duty,
            start_on_boot: config.start_on_boot,
        })
    }

    /// Program the initial duty, start the outputs if configured, and print the ready banner.
    pub fn boot<W: Write>(&mut self, out: &mut W) {
        self.pwm.set_duty(self.initial_duty);
        if self.start_on_boot {
            self.pwm.start(out);
        }
        let _ = out.write_str(LINE_END);
        write_reply(out, format_args!("{}", BANNER));
        log::info!("controller ready");
    }

    /// Parse and execute one completed line, reporting errors as reply lines.
    pub fn process_line<W: Write>(&mut self, line: &[u8], out: &mut W) {
        let command = parse_line(line);
        log::debug!("command {:?}", command);
        if let Err(e) = self.execute(command, out) {
            log::debug!("command failed: {}", e);
            if let Some(reply) = e.reply() {
                write_reply(out, format_args!("{}", reply));
            }
        }
    }

    /// Execute a parsed command. Confirmations are written to `out`; errors are returned.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        match command {
            Command::SetTarget(duty) => {
                let target = self.pwm.set_target(duty);
                write_reply(out, format_args!("TARGET {}%", target));
            }
            Command::SetFrequency(freq) => {
                // Negative values cannot be valid; map them to 0 so the range check rejects them.
                let freq = u32::try_from(freq).unwrap_or(0);
                let freq = self.pwm.set_frequency(freq, out)?;
                write_reply(out, format_args!("FREQ {} Hz", freq));
            }
            Command::Start => self.pwm.start(out),
            Command::Stop => self.pwm.stop(out),
            Command::Status => self.report_status(out),
            Command::Unknown => return Err(Error::UnknownCommand),
        }
        Ok(())
    }

    fn report_status<W: Write>(&self, out: &mut W) {
        let s = self.pwm.state();
        write_reply(out, format_args!("Duty: {}% -> {}%", s.duty_now, s.duty_target));
        write_reply(out, format_args!("Freq: {} Hz", s.frequency_hz));
        write_reply(
            out,
            format_args!("State: {}", if s.enabled { "ON" } else { "OFF" }),
        );
    }

    /// Ramp pass for tick `now_ms`. Returns the new duty when a step was taken.
    #[inline]
    pub fn poll(&mut self, now_ms: u32) -> Option<u8> {
        self.ramp.poll(now_ms, &mut self.pwm)
    }

    #[inline]
    pub fn state(&self) -> PwmState {
        self.pwm.state()
    }

    #[inline]
    pub fn pwm(&self) -> &PwmController<B> {
        &self.pwm
    }

    #[inline]
    pub fn pwm_mut(&mut self) -> &mut PwmController<B> {
        &mut self.pwm
    }
}
