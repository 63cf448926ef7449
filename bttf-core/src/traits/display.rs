//! Seven-segment display bus
//!
//! Several display modules can share one clock line; each one is
//! addressed by the (clock, data) pin pair it is wired to.

/// Number of digit cells on one display module
pub const DIGITS: usize = 4;

/// Maximum brightness level accepted by the display modules
pub const MAX_BRIGHTNESS: u8 = 7;

/// Errors that can occur when talking to a display module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Module did not acknowledge a byte
    NoAck,
    /// Pin pair is not usable for a display
    InvalidPins,
}

/// Transport for raw segment frames
pub trait SegmentBus {
    /// Write one frame of segment bits to the module on (`clk`, `dio`)
    ///
    /// `segments[0]` is the leftmost digit.
    fn write_segments(&mut self, clk: u8, dio: u8, segments: &[u8; DIGITS])
        -> Result<(), DisplayError>;

    /// Set the brightness (0-7) of the module on (`clk`, `dio`)
    fn set_brightness(&mut self, clk: u8, dio: u8, level: u8) -> Result<(), DisplayError>;
}
