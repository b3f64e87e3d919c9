// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Line parser for the text command protocol.
//!
//! Matching is case-sensitive. The argument-carrying prefixes are tried before the exact keywords,
//! the first match wins.

use crate::protocol::messages::*;

/// Parse one completed line (without its terminator).
pub fn parse_line(line: &[u8]) -> Command {
    if let Some(arg) = line.strip_prefix(CMD_SET) {
        Command::SetTarget(parse_int(arg))
    } else if let Some(arg) = line.strip_prefix(CMD_FREQ) {
        Command::SetFrequency(parse_int(arg))
    } else if line == CMD_START {
        Command::Start
    } else if line == CMD_STOP {
        Command::Stop
    } else if line == CMD_STATUS {
        Command::Status
    } else {
        Command::Unknown
    }
}

/// Lenient decimal parse with `atoi` rules: leading whitespace is skipped, an optional sign is
/// accepted, digits are consumed up to the first non-digit. No digits yields 0. The result
/// saturates at the `i32` range.
pub fn parse_int(bytes: &[u8]) -> i32 {
    let mut rest = bytes;
    while let Some((&b, tail)) = rest.split_first() {
        if !is_c_space(b) {
            break;
        }
        rest = tail;
    }

    let negative = match rest.first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let mut magnitude: i64 = 0;
    for &b in rest {
        if !b.is_ascii_digit() {
            break;
        }
        magnitude = (magnitude * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX) + 1);
    }

    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// `isspace` in the C locale.
#[inline]
fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}
