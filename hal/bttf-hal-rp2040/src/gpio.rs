//! Number-addressed GPIO bank
//!
//! Every pin is held as a `Flex` so it can switch between output and
//! input at runtime. Inputs get the internal pull-up, which lets the
//! bank emulate open-drain lines for the display bus.

use bttf_core::traits::{GpioBank, Level};
use embassy_rp::gpio::{self, Flex, Pull};

use crate::pins::{PinBank, PIN_COUNT};

/// GPIO bank over the pins left in a [`PinBank`]
pub struct FlexBank {
    pins: [Option<Flex<'static>>; PIN_COUNT],
}

impl FlexBank {
    /// Take every remaining pin out of `bank`
    ///
    /// Pins start as inputs with pull-up.
    pub fn new(bank: &mut PinBank) -> Self {
        let pins = bank.take_all().map(|pin| {
            pin.map(|pin| {
                let mut flex = Flex::new(pin);
                flex.set_pull(Pull::Up);
                flex.set_as_input();
                flex
            })
        });
        Self { pins }
    }

    /// Check if the bank holds a pin
    pub fn holds(&self, pin: u8) -> bool {
        matches!(self.pins.get(pin as usize), Some(Some(_)))
    }

    fn pin(&mut self, pin: u8) -> Option<&mut Flex<'static>> {
        self.pins.get_mut(pin as usize).and_then(Option::as_mut)
    }
}

impl GpioBank for FlexBank {
    fn set_output(&mut self, pin: u8) {
        if let Some(flex) = self.pin(pin) {
            flex.set_as_output();
        }
    }

    fn set_input(&mut self, pin: u8) {
        if let Some(flex) = self.pin(pin) {
            flex.set_pull(Pull::Up);
            flex.set_as_input();
        }
    }

    fn write(&mut self, pin: u8, level: Level) {
        if let Some(flex) = self.pin(pin) {
            flex.set_level(match level {
                Level::Low => gpio::Level::Low,
                Level::High => gpio::Level::High,
            });
        }
    }

    fn read(&mut self, pin: u8) -> Level {
        match self.pin(pin) {
            Some(flex) => Level::from_bool(flex.is_high()),
            None => Level::Low,
        }
    }
}
