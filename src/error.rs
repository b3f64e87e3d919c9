// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Firmware-wide error type.
//!
//! Command errors are not fatal: the command loop reports them on the serial line and carries on.
//! Configuration errors are only raised at boot.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The line did not match any known command.
    UnknownCommand,
    /// Requested PWM frequency is outside the accepted range.
    FrequencyOutOfRange { requested: u32 },
    /// Configuration is inconsistent.
    Config(&'static str),
}

impl Error {
    /// Reply line sent to the operator for this error. Configuration errors happen before the
    /// command port is up and have none.
    pub fn reply(&self) -> Option<&'static str> {
        match self {
            Self::UnknownCommand => Some("CMD ERR"),
            Self::FrequencyOutOfRange { .. } => Some("FREQ ERR"),
            Self::Config(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand => write!(f, "unknown command"),
            Self::FrequencyOutOfRange { requested } => {
                write!(f, "frequency {requested} Hz out of range")
            }
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
