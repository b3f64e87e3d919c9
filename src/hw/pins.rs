// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F7 PWM controller board.

use stm32f7xx_hal::{
    gpio::{gpioa, gpiob, gpioc, gpiod, Alternate},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```text
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD);
/// ```
pub struct BoardPins {
    pub uart5: Uart5Pins,
    pub tim1: Tim1Pins,
}

/// Command port
pub struct Uart5Pins {
    pub tx: gpioc::PC12<Alternate<8>>,
    pub rx: gpiod::PD2<Alternate<8>>,
}

/// TIM1 primary and complementary PWM outputs
pub struct Tim1Pins {
    pub ch1: gpioa::PA8<Alternate<1>>,
    pub ch2: gpioa::PA9<Alternate<1>>,
    pub ch3: gpioa::PA10<Alternate<1>>,

    pub ch1n: gpiob::PB13<Alternate<1>>,
    pub ch2n: gpiob::PB14<Alternate<1>>,
    pub ch3n: gpiob::PB15<Alternate<1>>,
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpiob: pac::GPIOB, gpioc: pac::GPIOC, gpiod: pac::GPIOD) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();

        Self {
            uart5: Uart5Pins {
                tx: gpioc.pc12.into_alternate::<8>(),
                rx: gpiod.pd2.into_alternate::<8>(),
            },

            tim1: Tim1Pins {
                ch1: gpioa.pa8.into_alternate::<1>(),
                ch2: gpioa.pa9.into_alternate::<1>(),
                ch3: gpioa.pa10.into_alternate::<1>(),
                ch1n: gpiob.pb13.into_alternate::<1>(),
                ch2n: gpiob.pb14.into_alternate::<1>(),
                ch3n: gpiob.pb15.into_alternate::<1>(),
            },
        }
    }
}
