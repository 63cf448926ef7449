//! TM1637 seven-segment display driver (bit-banged two-wire)
//!
//! The TM1637 drives up to six digits of common-anode LEDs and talks
//! over a two-wire bus that looks like I2C without addresses:
//!
//! - Start: DIO falls while CLK is high
//! - Data: bytes are clocked LSB first, DIO sampled on the CLK rising edge
//! - ACK: after each byte the chip pulls DIO low for one clock
//! - Stop: DIO rises while CLK is high
//!
//! Both lines are open-drain with pull-ups. A line is released by
//! switching the pin to input and pulled low by driving it as an output.
//!
//! A frame is written as three transactions:
//! 1. Data command (auto-increment address)
//! 2. Address command followed by the segment bytes
//! 3. Display control command (display on + brightness)
//!
//! Several modules may share CLK. Each is addressed by its own DIO line;
//! a module ignores clock pulses while its DIO stays released.

use bttf_core::traits::display::{DIGITS, MAX_BRIGHTNESS};
use bttf_core::traits::{DisplayError, GpioBank, Level};
use embedded_hal::delay::DelayNs;
use heapless::FnvIndexMap;

/// TM1637 command bytes
pub mod cmd {
    /// Write data to display register, auto-increment address
    pub const DATA_AUTO_INCREMENT: u8 = 0x40;
    /// Set address to digit 0
    pub const ADDRESS_DIGIT0: u8 = 0xC0;
    /// Display control: display on, OR with brightness 0-7
    pub const DISPLAY_ON: u8 = 0x88;
}

/// Default half-bit delay (µs)
///
/// The chip is rated for 250 kHz but cheap modules carry large
/// capacitors on both lines.
pub const DEFAULT_BIT_DELAY_US: u32 = 100;

/// Maximum number of modules with a remembered brightness
const MAX_MODULES: usize = 8;

/// Bit-banged TM1637 bus master
///
/// Holds only timing and per-module brightness; the pins are borrowed
/// from a [`GpioBank`] for each transaction.
pub struct Tm1637<D> {
    delay: D,
    bit_delay_us: u32,
    /// Brightness by DIO pin
    brightness: FnvIndexMap<u8, u8, MAX_MODULES>,
}

impl<D: DelayNs> Tm1637<D> {
    /// Create a bus master with the default bit timing
    pub fn new(delay: D) -> Self {
        Self::with_bit_delay(delay, DEFAULT_BIT_DELAY_US)
    }

    /// Create a bus master with a custom half-bit delay
    pub fn with_bit_delay(delay: D, bit_delay_us: u32) -> Self {
        Self {
            delay,
            bit_delay_us,
            brightness: FnvIndexMap::new(),
        }
    }

    /// Brightness last set for the module on `dio`
    pub fn brightness(&self, dio: u8) -> u8 {
        self.brightness.get(&dio).copied().unwrap_or(MAX_BRIGHTNESS)
    }

    /// Write a full frame to the module on (`clk`, `dio`)
    ///
    /// `segments[0]` is the leftmost digit. The display is switched on
    /// at the module's remembered brightness afterwards.
    pub fn write_frame<G: GpioBank>(
        &mut self,
        gpio: &mut G,
        clk: u8,
        dio: u8,
        segments: &[u8; DIGITS],
    ) -> Result<(), DisplayError> {
        if clk == dio {
            return Err(DisplayError::InvalidPins);
        }

        self.transaction(gpio, clk, dio, &[cmd::DATA_AUTO_INCREMENT])?;

        let mut payload = [0u8; DIGITS + 1];
        payload[0] = cmd::ADDRESS_DIGIT0;
        payload[1..].copy_from_slice(segments);
        self.transaction(gpio, clk, dio, &payload)?;

        let control = cmd::DISPLAY_ON | self.brightness(dio);
        self.transaction(gpio, clk, dio, &[control])
    }

    /// Set the brightness (0-7) of the module on (`clk`, `dio`)
    ///
    /// The level is remembered even if the module does not answer, so it
    /// is applied with the next frame.
    pub fn set_brightness<G: GpioBank>(
        &mut self,
        gpio: &mut G,
        clk: u8,
        dio: u8,
        level: u8,
    ) -> Result<(), DisplayError> {
        if clk == dio {
            return Err(DisplayError::InvalidPins);
        }

        let level = level.min(MAX_BRIGHTNESS);
        // Table full: the module falls back to maximum on later frames
        let _ = self.brightness.insert(dio, level);
        self.transaction(gpio, clk, dio, &[cmd::DISPLAY_ON | level])
    }

    /// Send bytes framed by start and stop
    ///
    /// The stop condition is always sent so the bus ends idle.
    fn transaction<G: GpioBank>(
        &mut self,
        gpio: &mut G,
        clk: u8,
        dio: u8,
        bytes: &[u8],
    ) -> Result<(), DisplayError> {
        self.start(gpio, clk, dio);
        let result = bytes
            .iter()
            .try_for_each(|&byte| self.write_byte(gpio, clk, dio, byte));
        self.stop(gpio, clk, dio);
        result
    }

    fn start<G: GpioBank>(&mut self, gpio: &mut G, clk: u8, dio: u8) {
        release(gpio, clk);
        release(gpio, dio);
        self.bit_delay();
        pull_low(gpio, dio);
        self.bit_delay();
    }

    fn stop<G: GpioBank>(&mut self, gpio: &mut G, clk: u8, dio: u8) {
        pull_low(gpio, clk);
        pull_low(gpio, dio);
        self.bit_delay();
        release(gpio, clk);
        self.bit_delay();
        release(gpio, dio);
        self.bit_delay();
    }

    fn write_byte<G: GpioBank>(
        &mut self,
        gpio: &mut G,
        clk: u8,
        dio: u8,
        byte: u8,
    ) -> Result<(), DisplayError> {
        for bit in 0..8 {
            pull_low(gpio, clk);
            if byte & (1 << bit) != 0 {
                release(gpio, dio);
            } else {
                pull_low(gpio, dio);
            }
            self.bit_delay();
            release(gpio, clk);
            self.bit_delay();
        }

        // ACK clock
        pull_low(gpio, clk);
        release(gpio, dio);
        self.bit_delay();
        release(gpio, clk);
        self.bit_delay();
        let ack = gpio.read(dio) == Level::Low;
        pull_low(gpio, clk);
        self.bit_delay();

        if ack {
            Ok(())
        } else {
            Err(DisplayError::NoAck)
        }
    }

    fn bit_delay(&mut self) {
        self.delay.delay_us(self.bit_delay_us);
    }
}

/// Let the pull-up take the line high
fn release<G: GpioBank>(gpio: &mut G, pin: u8) {
    gpio.set_input(pin);
}

/// Drive the line low
fn pull_low<G: GpioBank>(gpio: &mut G, pin: u8) {
    gpio.write(pin, Level::Low);
    gpio.set_output(pin);
}
