// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! UART abstraction layer.
//!
//! [`Usart`] is the blocking transmit half used for command replies. [`CommandRx`] is the receive
//! half, driven one byte per interrupt: the handler reads the byte with the RXNE interrupt
//! disarmed, and [`ReceiveArm::arm`] re-enables it for the next byte.
//!
//! To access the terminal on the host machine use
//! ```text
//! $ screen /dev/tty.usbserial* 115200
//! ```

use core::fmt;
use nb::block;

use stm32f7xx_hal::{
    pac,
    prelude::*,
    serial::{Instance, Pins, Rx, Serial, Tx},
};

use crate::protocol::ReceiveArm;

pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Usart<U> {
    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }
}

// Implement `core::fmt::Write` so replies can be formatted straight onto the wire.
impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}

/// Receive half of UART5.
pub struct CommandRx {
    rx: Rx<pac::UART5>,
}

impl CommandRx {
    /// Read the byte that raised the interrupt and disarm until [`arm`](ReceiveArm::arm).
    ///
    /// Returns `None` on a spurious interrupt or a framing/overrun error; the caller still has to
    /// re-arm in that case.
    pub fn take_byte(&mut self) -> Option<u8> {
        regs().cr1.modify(|_, w| w.rxneie().clear_bit());
        match self.rx.read() {
            Ok(b) => Some(b),
            Err(nb::Error::WouldBlock) => None,
            Err(nb::Error::Other(e)) => {
                log::warn!("uart5 rx error: {:?}", e);
                None
            }
        }
    }
}

impl ReceiveArm for CommandRx {
    #[inline]
    fn arm(&mut self) {
        regs().cr1.modify(|_, w| w.rxneie().set_bit());
    }
}

/// Split the UART5 serial port into the reply console and the interrupt-driven receiver. The
/// receiver starts disarmed.
pub fn split<PINS: Pins<pac::UART5>>(
    serial: Serial<pac::UART5, PINS>,
) -> (Usart<pac::UART5>, CommandRx) {
    let (tx, rx) = serial.split();
    regs().cr1.modify(|_, w| w.rxneie().clear_bit());
    (Usart { tx }, CommandRx { rx })
}

/// UART5 register block, for the interrupt enable bit the HAL does not expose on the split halves.
/// UART5 shares the USART1 register layout.
#[inline]
fn regs() -> &'static pac::usart1::RegisterBlock {
    unsafe { &*pac::UART5::ptr() }
}
