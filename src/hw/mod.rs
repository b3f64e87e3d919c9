// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

pub mod pins;
pub mod pwm;
pub mod tick;
pub mod usart;

pub use pins::BoardPins;
pub use pwm::Tim1Pwm;
pub use usart::{CommandRx, Usart};
