// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Three-phase complementary PWM on the TIM1 advanced-control timer.
//!
//! CH1–CH3 drive PA8–PA10, CH1N–CH3N drive PB13–PB15. The counter runs undivided in up-counting
//! PWM mode 1 with compare and auto-reload preload, so register writes land on the next update
//! event. Dead-time is inserted by the BDTR generator between every primary/complementary edge.

use stm32f7xx_hal::{pac, rcc::Clocks};

use crate::control::{Channel, PwmBackend};

/// OCxM value for PWM mode 1.
const OCM_PWM1: u8 = 0b110;

pub struct Tim1Pwm {
    tim: pac::TIM1,
    clock_hz: u32,
}

impl Tim1Pwm {
    /// Configure TIM1 for complementary PWM with all outputs disabled.
    pub fn new(tim: pac::TIM1, clocks: &Clocks, dead_time_ticks: u8) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.tim1en().set_bit());
        cortex_m::asm::delay(16);

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        tim.psc.write(|w| w.psc().bits(0));

        tim.ccmr1_output().modify(|_, w| unsafe {
            w.oc1m()
                .bits(OCM_PWM1)
                .oc1pe()
                .set_bit()
                .oc2m()
                .bits(OCM_PWM1)
                .oc2pe()
                .set_bit()
        });
        tim.ccmr2_output()
            .modify(|_, w| unsafe { w.oc3m().bits(OCM_PWM1).oc3pe().set_bit() });

        // Active-high primary and complementary outputs, all disabled.
        tim.ccer.write(|w| unsafe { w.bits(0) });

        tim.bdtr.modify(|_, w| unsafe {
            w.dtg()
                .bits(dead_time_ticks)
                .aoe()
                .set_bit()
                .moe()
                .clear_bit()
        });

        tim.cr1.modify(|_, w| w.arpe().set_bit());

        // Load the preloaded registers, then start counting
        tim.egr.write(|w| w.ug().set_bit());
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self {
            tim,
            clock_hz: clocks.timclk2().raw(),
        }
    }
}

impl PwmBackend for Tim1Pwm {
    #[inline]
    fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    fn set_period(&mut self, period: u32) {
        let arr = if period > u32::from(u16::MAX) {
            log::warn!("tim1 period {} clamped to 16 bits", period);
            u16::MAX
        } else {
            period as u16
        };
        self.tim.arr.write(|w| unsafe { w.bits(u32::from(arr)) });
    }

    fn set_compare(&mut self, channel: Channel, pulse: u32) {
        let ccr = pulse.min(u32::from(u16::MAX));
        match channel {
            Channel::Ch1 => self.tim.ccr1.write(|w| unsafe { w.bits(ccr) }),
            Channel::Ch2 => self.tim.ccr2.write(|w| unsafe { w.bits(ccr) }),
            Channel::Ch3 => self.tim.ccr3.write(|w| unsafe { w.bits(ccr) }),
        }
    }

    fn enable_outputs(&mut self) {
        self.tim.ccer.modify(|_, w| {
            w.cc1e()
                .set_bit()
                .cc1ne()
                .set_bit()
                .cc2e()
                .set_bit()
                .cc2ne()
                .set_bit()
                .cc3e()
                .set_bit()
                .cc3ne()
                .set_bit()
        });
        // Main output enable
        self.tim.bdtr.modify(|_, w| w.moe().set_bit());
    }

    fn disable_outputs(&mut self) {
        self.tim.bdtr.modify(|_, w| w.moe().clear_bit());
        self.tim.ccer.modify(|_, w| {
            w.cc1ne()
                .clear_bit()
                .cc2ne()
                .clear_bit()
                .cc3ne()
                .clear_bit()
                .cc1e()
                .clear_bit()
                .cc2e()
                .clear_bit()
                .cc3e()
                .clear_bit()
        });
    }
}
