//! Pin-number addressed GPIO
//!
//! The lamp addresses pins by number because its pin assignment comes
//! from configuration, not from typed peripherals.

/// Logic level of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Level from a boolean (true = high)
    pub const fn from_bool(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Bank of GPIO pins addressed by number
///
/// Implementations should ignore operations on pins they do not hold,
/// the same way a write to an unconnected pin does nothing.
pub trait GpioBank {
    /// Switch a pin to push-pull output
    fn set_output(&mut self, pin: u8);

    /// Switch a pin to input (releases the line)
    fn set_input(&mut self, pin: u8);

    /// Drive an output pin
    fn write(&mut self, pin: u8, level: Level);

    /// Read the current level of a pin
    fn read(&mut self, pin: u8) -> Level;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_bool() {
        assert_eq!(Level::from_bool(true), Level::High);
        assert_eq!(Level::from_bool(false), Level::Low);
    }
}
