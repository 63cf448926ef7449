//! Board wiring
//!
//! Bundles the RP2040 peripherals into the platform the lamp driver
//! runs on.

use bttf_core::lamp::TimeDisplayDriver;
use bttf_core::registry::PinRegistry;
use bttf_core::time::LocalTime;
use bttf_core::traits::display::DIGITS;
use bttf_core::traits::{
    DisplayError, GpioBank, Level, LocalTimeSource, PinError, PinOwner, PinOwnership, SegmentBus,
};
use bttf_drivers::Tm1637;
use bttf_hal_rp2040::gpio::FlexBank;
use bttf_hal_rp2040::pins::PinBank;
use bttf_hal_rp2040::rtc::RtcTime;
use embassy_time::Delay;

/// Pico pins wired to on-board functions
///
/// - GPIO23: SMPS power-save
/// - GPIO24: VBUS sense
/// - GPIO25: on-board LED
/// - GPIO29: VSYS/3 ADC
pub const RESERVED_PINS: [u8; 4] = [23, 24, 25, 29];

/// The lamp driver on this board
pub type Lamp = TimeDisplayDriver<LampBoard>;

/// RP2040 Pico board as a lamp platform
pub struct LampBoard {
    registry: PinRegistry,
    gpio: FlexBank,
    displays: Tm1637<Delay>,
    clock: RtcTime,
}

impl LampBoard {
    /// Take the remaining GPIO pins and reserve the on-board ones
    pub fn new(pins: &mut PinBank, clock: RtcTime) -> Self {
        let mut registry = PinRegistry::new();
        for pin in RESERVED_PINS {
            // Fresh registry, cannot fail
            let _ = registry.reserve(pin);
        }

        Self {
            registry,
            gpio: FlexBank::new(pins),
            displays: Tm1637::new(Delay),
            clock,
        }
    }

    /// Pins currently held by `owner`
    pub fn claimed_by(&self, owner: PinOwner) -> usize {
        self.registry.claimed_by(owner)
    }
}

impl PinOwnership for LampBoard {
    fn claim(&mut self, pin: u8, output: bool, owner: PinOwner) -> Result<(), PinError> {
        if !self.gpio.holds(pin) {
            return Err(PinError::InvalidPin);
        }
        self.registry.claim(pin, output, owner)
    }

    fn release(&mut self, pin: u8, owner: PinOwner) -> Result<(), PinError> {
        self.registry.release(pin, owner)?;
        // Leave the pin floating-high rather than driving it
        self.gpio.set_input(pin);
        Ok(())
    }

    fn owner_of(&self, pin: u8) -> Option<PinOwner> {
        self.registry.owner_of(pin)
    }
}

impl GpioBank for LampBoard {
    fn set_output(&mut self, pin: u8) {
        self.gpio.set_output(pin);
    }

    fn set_input(&mut self, pin: u8) {
        self.gpio.set_input(pin);
    }

    fn write(&mut self, pin: u8, level: Level) {
        self.gpio.write(pin, level);
    }

    fn read(&mut self, pin: u8) -> Level {
        self.gpio.read(pin)
    }
}

impl SegmentBus for LampBoard {
    fn write_segments(
        &mut self,
        clk: u8,
        dio: u8,
        segments: &[u8; DIGITS],
    ) -> Result<(), DisplayError> {
        self.displays.write_frame(&mut self.gpio, clk, dio, segments)
    }

    fn set_brightness(&mut self, clk: u8, dio: u8, level: u8) -> Result<(), DisplayError> {
        self.displays.set_brightness(&mut self.gpio, clk, dio, level)
    }
}

impl LocalTimeSource for LampBoard {
    fn local_time(&mut self) -> Option<LocalTime> {
        self.clock.local_time()
    }
}
