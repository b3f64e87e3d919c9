// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Line framing for the interrupt-driven receive path.
//!
//! The receive interrupt delivers one byte at a time to [`LineAssembler::on_byte_received`]. A CR
//! or LF completes the line, which is copied into a FIFO of [`RX_LINE_QUEUE`] lines for the main
//! loop to drain in arrival order. The working buffer is circular: a line longer than
//! [`RX_BUF_SIZE`] silently wraps and keeps only the bytes written since the wrap.
//!
//! [`SharedLineAssembler`] is the `static`-friendly wrapper used between the UART interrupt and the
//! main loop. Completed lines are handed over by value, so bytes arriving after a terminator can
//! never corrupt a line the main loop has not taken yet. When the queue is full the newly
//! completed line is dropped and counted; queued lines are never overwritten.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::{Deque, Vec};

use crate::config::{RX_BUF_SIZE, RX_LINE_QUEUE};

/// A completed command line, terminator excluded.
pub type Line = Vec<u8, RX_BUF_SIZE>;

/// Arms the next single-byte asynchronous receive.
///
/// If a byte is handled without re-arming, no further receive completions arrive and the command
/// input stalls.
pub trait ReceiveArm {
    fn arm(&mut self);
}

#[inline]
fn is_terminator(byte: u8) -> bool {
    byte == b'\r' || byte == b'\n'
}

pub struct LineAssembler {
    buf: [u8; RX_BUF_SIZE],
    write_index: usize,
    ready: Deque<Line, RX_LINE_QUEUE>,
    dropped: u32,
}

impl LineAssembler {
    pub const fn new() -> Self {
        Self {
            buf: [0; RX_BUF_SIZE],
            write_index: 0,
            ready: Deque::new(),
            dropped: 0,
        }
    }

    /// Handle one received byte, then re-arm the receive. The re-arm happens for every byte.
    pub fn on_byte_received<A: ReceiveArm>(&mut self, byte: u8, arm: &mut A) {
        self.push(byte);
        arm.arm();
    }

    /// Append or terminate. Returns `true` when `byte` completed a line.
    pub fn push(&mut self, byte: u8) -> bool {
        if is_terminator(byte) {
            self.finish_line();
            return true;
        }

        self.buf[self.write_index] = byte;
        self.write_index += 1;
        if self.write_index >= RX_BUF_SIZE {
            self.write_index = 0;
        }
        false
    }

    fn finish_line(&mut self) {
        let written = &self.buf[..self.write_index];
        // Content stops at the first NUL, like the C string the line used to be.
        let len = written.iter().position(|&b| b == 0).unwrap_or(written.len());
        self.write_index = 0;

        // `written` is a slice of a RX_BUF_SIZE array, so it always fits a `Line`.
        let line = Line::from_slice(&written[..len]).unwrap_or_default();
        if self.ready.push_back(line).is_err() {
            self.dropped = self.dropped.wrapping_add(1);
        }
    }

    /// Take the oldest completed line, if any. Each line is returned once.
    pub fn take_ready_line(&mut self) -> Option<Line> {
        self.ready.pop_front()
    }

    /// Completed lines waiting for the main loop.
    #[inline]
    pub fn pending(&self) -> usize {
        self.ready.len()
    }

    #[inline]
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Number of completed lines dropped because the queue was full. Clears the count.
    pub fn take_dropped(&mut self) -> u32 {
        core::mem::take(&mut self.dropped)
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Line assembler shared between the receive interrupt and the main loop.
pub struct SharedLineAssembler {
    inner: Mutex<RefCell<LineAssembler>>,
}

impl SharedLineAssembler {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(LineAssembler::new())),
        }
    }

    /// Interrupt side. The receive is re-armed after the critical section is released.
    pub fn on_byte_received<A: ReceiveArm>(&self, byte: u8, arm: &mut A) {
        critical_section::with(|cs| {
            self.inner.borrow_ref_mut(cs).push(byte);
        });
        arm.arm();
    }

    /// Main loop side.
    pub fn take_ready_line(&self) -> Option<Line> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take_ready_line())
    }

    pub fn take_dropped(&self) -> u32 {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take_dropped())
    }
}

impl Default for SharedLineAssembler {
    fn default() -> Self {
        Self::new()
    }
}
