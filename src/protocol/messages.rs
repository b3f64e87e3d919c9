// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Text command vocabulary used to communicate with the controller.

// Command keywords. Prefixes carry their trailing space.
pub const CMD_SET: &[u8] = b"set ";
pub const CMD_FREQ: &[u8] = b"freq ";
pub const CMD_START: &[u8] = b"start";
pub const CMD_STOP: &[u8] = b"stop";
pub const CMD_STATUS: &[u8] = b"status";

/// Every reply line ends with CRLF.
pub const LINE_END: &str = "\r\n";

pub const BANNER: &str = "=== PWM CONTROLLER READY ===";

/// A parsed request line. Numeric arguments are kept as parsed; validation happens on execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetTarget(i32),
    SetFrequency(i32),
    Start,
    Stop,
    Status,
    Unknown,
}

/// Write one reply line. Transmit errors are dropped: the link has no retransmission.
pub fn write_reply<W: core::fmt::Write>(out: &mut W, args: core::fmt::Arguments<'_>) {
    let _ = out.write_fmt(args);
    let _ = out.write_str(LINE_END);
}
