// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # pwmctl
//!
//! Firmware for a three-phase complementary PWM generator controlled over a serial line, written
//! in Rust, targeting an STM32F7 MCU (TIM1 + UART5).
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`protocol`] | Line framing of the receive stream and the text command vocabulary |
//! | [`control`] | PWM control facade and the duty ramp scheduler |
//! | [`controller`] | Command interpreter tying the protocol to the control layer |
//! | [`config`] | Compiled-in defaults and [`ControllerConfig`](config::ControllerConfig) |
//! | `hw` | MCU-level wrappers around UART5, TIM1 and SysTick (feature `stm32`) |
//!
//! Everything except `hw` is hardware independent and runs on the host:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features stm32 --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod control;
pub mod controller;
pub mod protocol;

#[cfg(feature = "stm32")]
pub mod hw;

mod error;

pub use error::{Error, Result};
