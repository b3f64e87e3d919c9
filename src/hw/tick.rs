// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Millisecond tick from SysTick.
//!
//! The `SysTick` exception handler in the binary calls [`on_tick`]; the main loop reads
//! [`now_ms`]. The counter wraps after ~49 days, consumers compare with wrapping arithmetic.

use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m::peripheral::{syst::SystClkSource, SYST};
use stm32f7xx_hal::rcc::Clocks;

static MILLIS: AtomicU32 = AtomicU32::new(0);

/// Program SysTick for a 1 kHz interrupt from the core clock.
pub fn start(mut syst: SYST, clocks: &Clocks) {
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(clocks.sysclk().raw() / 1_000 - 1);
    syst.clear_current();
    syst.enable_counter();
    syst.enable_interrupt();
}

#[inline]
pub fn on_tick() {
    MILLIS.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn now_ms() -> u32 {
    MILLIS.load(Ordering::Relaxed)
}
