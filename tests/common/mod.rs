// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Mock PWM backend for host tests.
//!
//! Records every register-level call so tests can assert on the exact sequence the facade
//! produced, and keeps a register image for the current values.

#![allow(dead_code)]

use pwmctl::config::ControllerConfig;
use pwmctl::control::{Channel, PwmBackend};
use pwmctl::controller::Controller;
use pwmctl::protocol::{LineAssembler, ReceiveArm};

pub const CLOCK_HZ: u32 = 16_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmCall {
    SetPeriod(u32),
    SetCompare(Channel, u32),
    Enable,
    Disable,
}

#[derive(Default)]
pub struct MockPwm {
    pub calls: Vec<PwmCall>,
    pub period: u32,
    pub compare: [u32; 3],
    pub outputs_enabled: bool,
}

impl MockPwm {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PwmBackend for MockPwm {
    fn clock_hz(&self) -> u32 {
        CLOCK_HZ
    }

    fn set_period(&mut self, period: u32) {
        self.calls.push(PwmCall::SetPeriod(period));
        self.period = period;
    }

    fn set_compare(&mut self, channel: Channel, pulse: u32) {
        self.calls.push(PwmCall::SetCompare(channel, pulse));
        self.compare[channel as usize] = pulse;
    }

    fn enable_outputs(&mut self) {
        self.calls.push(PwmCall::Enable);
        self.outputs_enabled = true;
    }

    fn disable_outputs(&mut self) {
        self.calls.push(PwmCall::Disable);
        self.outputs_enabled = false;
    }
}

/// Counts receive re-arms.
#[derive(Default)]
pub struct MockRx {
    pub armed: usize,
}

impl ReceiveArm for MockRx {
    fn arm(&mut self) {
        self.armed += 1;
    }
}

/// Board stand-in: serial bytes in, reply text out, a millisecond clock.
pub struct Bench {
    pub controller: Controller<MockPwm>,
    pub rx_lines: LineAssembler,
    pub rx: MockRx,
    pub console: String,
    pub now_ms: u32,
}

impl Bench {
    /// Construct and boot with the default configuration.
    pub fn boot() -> Self {
        Self::boot_with(ControllerConfig::default())
    }

    pub fn boot_with(config: ControllerConfig) -> Self {
        let mut controller = Controller::new(MockPwm::new(), &config).unwrap();
        let mut console = String::new();
        let mut rx = MockRx::default();
        rx.arm();
        controller.boot(&mut console);
        Self {
            controller,
            rx_lines: LineAssembler::new(),
            rx,
            console,
            now_ms: 0,
        }
    }

    /// Deliver bytes as the receive interrupt would, running one main loop pass after each.
    pub fn send(&mut self, text: &str) -> String {
        self.console.clear();
        for &b in text.as_bytes() {
            self.rx_lines.on_byte_received(b, &mut self.rx);
            self.main_loop_pass();
        }
        self.console.clone()
    }

    /// Deliver all bytes before the main loop gets to run, as when it is busy transmitting a reply,
    /// then run one pass.
    pub fn burst(&mut self, text: &str) -> String {
        self.console.clear();
        for &b in text.as_bytes() {
            self.rx_lines.on_byte_received(b, &mut self.rx);
        }
        self.main_loop_pass();
        self.console.clone()
    }

    /// Advance the clock one millisecond at a time, running a main loop pass per tick.
    pub fn advance(&mut self, ms: u32) {
        for _ in 0..ms {
            self.now_ms = self.now_ms.wrapping_add(1);
            self.main_loop_pass();
        }
    }

    fn main_loop_pass(&mut self) {
        while let Some(line) = self.rx_lines.take_ready_line() {
            self.controller.process_line(&line, &mut self.console);
        }
        self.controller.poll(self.now_ms);
    }

    pub fn backend(&self) -> &MockPwm {
        self.controller.pwm().backend()
    }
}
