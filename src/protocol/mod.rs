// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

pub mod line;
pub mod messages;
pub mod parser;

pub use line::{Line, LineAssembler, ReceiveArm, SharedLineAssembler};
pub use messages::{write_reply, Command};
pub use parser::parse_line;
