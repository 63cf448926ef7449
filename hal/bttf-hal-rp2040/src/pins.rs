//! Pin bank for config-driven pin assignment
//!
//! Moves all GPIO pins out of the peripherals into an array indexed by
//! pin number, so pins can be picked at runtime from configuration.

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{DMA_CH0, FLASH, RTC};
use embassy_rp::{Peri, Peripherals};

/// Number of user GPIO pins on the RP2040
pub const PIN_COUNT: usize = 30;

/// Every GPIO pin, indexed by pin number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; PIN_COUNT],
}

impl PinBank {
    /// Take every pin still in the bank, leaving it empty
    pub fn take_all(&mut self) -> [Option<Peri<'static, AnyPin>>; PIN_COUNT] {
        core::mem::replace(&mut self.pins, [const { None }; PIN_COUNT])
    }
}

/// Non-GPIO peripherals that remain after creating the pin bank
pub struct RemainingPeripherals {
    pub flash: Peri<'static, FLASH>,
    pub dma_ch0: Peri<'static, DMA_CH0>,
    pub rtc: Peri<'static, RTC>,
}

/// Split the peripherals into the pin bank and the rest
pub fn split(p: Peripherals) -> (PinBank, RemainingPeripherals) {
    let pins = [
        Some(p.PIN_0.into()),
        Some(p.PIN_1.into()),
        Some(p.PIN_2.into()),
        Some(p.PIN_3.into()),
        Some(p.PIN_4.into()),
        Some(p.PIN_5.into()),
        Some(p.PIN_6.into()),
        Some(p.PIN_7.into()),
        Some(p.PIN_8.into()),
        Some(p.PIN_9.into()),
        Some(p.PIN_10.into()),
        Some(p.PIN_11.into()),
        Some(p.PIN_12.into()),
        Some(p.PIN_13.into()),
        Some(p.PIN_14.into()),
        Some(p.PIN_15.into()),
        Some(p.PIN_16.into()),
        Some(p.PIN_17.into()),
        Some(p.PIN_18.into()),
        Some(p.PIN_19.into()),
        Some(p.PIN_20.into()),
        Some(p.PIN_21.into()),
        Some(p.PIN_22.into()),
        Some(p.PIN_23.into()),
        Some(p.PIN_24.into()),
        Some(p.PIN_25.into()),
        Some(p.PIN_26.into()),
        Some(p.PIN_27.into()),
        Some(p.PIN_28.into()),
        Some(p.PIN_29.into()),
    ];
    let remaining = RemainingPeripherals {
        flash: p.FLASH,
        dma_ch0: p.DMA_CH0,
        rtc: p.RTC,
    };
    (PinBank { pins }, remaining)
}
