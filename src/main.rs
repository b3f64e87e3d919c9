#![no_main]
#![no_std]

use core::cell::RefCell;

use cortex_m::peripheral::NVIC;
use cortex_m_rt::{entry, exception};
use critical_section::Mutex;
use panic_halt as _;

use hal::{
    pac::{self, interrupt},
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use pwmctl::config::ControllerConfig;
use pwmctl::controller::Controller;
use pwmctl::hw::{self, tick, BoardPins, CommandRx, Tim1Pwm};
use pwmctl::protocol::{ReceiveArm, SharedLineAssembler};

/// Lines completed by the UART5 interrupt, drained in order by the main loop.
static RX_LINES: SharedLineAssembler = SharedLineAssembler::new();

/// Receive half of UART5, owned by the interrupt after startup.
static COMMAND_RX: Mutex<RefCell<Option<CommandRx>>> = Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    let config = ControllerConfig::default();

    // Clocks: HSI, 16 MHz on every bus
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD);

    // UART5 (command port)
    let usart_cfg = Config {
        baud_rate: config.baud_rate.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.UART5, (pins.uart5.tx, pins.uart5.rx), &clocks, usart_cfg);
    let (mut console, mut rx) = hw::usart::split(serial);

    tick::start(cp.SYST, &clocks);

    // TIM1 (three-phase complementary PWM), outputs stay routed for the life of the program
    let _tim1_pins = pins.tim1;
    let pwm = Tim1Pwm::new(dp.TIM1, &clocks, config.dead_time_ticks);
    let mut controller = Controller::new(pwm, &config).unwrap();

    // First receive must be armed before any byte can arrive
    rx.arm();
    critical_section::with(|cs| *COMMAND_RX.borrow_ref_mut(cs) = Some(rx));
    unsafe {
        NVIC::unmask(pac::Interrupt::UART5);
    }

    controller.boot(&mut console);

    loop {
        while let Some(line) = RX_LINES.take_ready_line() {
            controller.process_line(&line, &mut console);
        }

        let dropped = RX_LINES.take_dropped();
        if dropped > 0 {
            log::warn!("{} command line(s) dropped, receive queue full", dropped);
        }

        controller.poll(tick::now_ms());
    }
}

#[interrupt]
fn UART5() {
    critical_section::with(|cs| {
        if let Some(rx) = COMMAND_RX.borrow_ref_mut(cs).as_mut() {
            match rx.take_byte() {
                Some(byte) => RX_LINES.on_byte_received(byte, rx),
                None => rx.arm(),
            }
        }
    });
}

#[exception]
fn SysTick() {
    tick::on_tick();
}
