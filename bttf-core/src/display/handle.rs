//! Display module handle
//!
//! A handle is just the pin pair a module is wired to plus the last
//! brightness and frame sent to it. All traffic goes through a
//! [`SegmentBus`], so several handles can share a clock line.

use crate::traits::display::{DisplayError, SegmentBus, DIGITS, MAX_BRIGHTNESS};

use super::segments::DisplayValue;

/// Handle to one four-digit seven-segment module
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentDisplay {
    clk: u8,
    dio: u8,
    brightness: u8,
    last: Option<[u8; DIGITS]>,
}

impl SegmentDisplay {
    /// Create a handle for the module on (`clk`, `dio`)
    pub fn new(clk: u8, dio: u8) -> Self {
        Self {
            clk,
            dio,
            brightness: MAX_BRIGHTNESS,
            last: None,
        }
    }

    /// Clock pin
    pub fn clk(&self) -> u8 {
        self.clk
    }

    /// Data pin
    pub fn dio(&self) -> u8 {
        self.dio
    }

    /// Current brightness (0-7)
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Last frame successfully written
    pub fn last_frame(&self) -> Option<[u8; DIGITS]> {
        self.last
    }

    /// Set brightness, clamped to 0-7
    pub fn set_brightness<B: SegmentBus>(
        &mut self,
        bus: &mut B,
        level: u8,
    ) -> Result<(), DisplayError> {
        self.brightness = level.min(MAX_BRIGHTNESS);
        bus.set_brightness(self.clk, self.dio, self.brightness)
    }

    /// Show a value
    ///
    /// The frame is only recorded once the module accepted it.
    pub fn show<B: SegmentBus>(
        &mut self,
        bus: &mut B,
        value: DisplayValue,
    ) -> Result<(), DisplayError> {
        let frame = value.encode();
        bus.write_segments(self.clk, self.dio, &frame)?;
        self.last = Some(frame);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bus that records the last call and can be told to fail
    struct MockBus {
        frame: Option<(u8, u8, [u8; DIGITS])>,
        brightness: Option<(u8, u8, u8)>,
        fail: bool,
    }

    impl MockBus {
        fn new() -> Self {
            Self {
                frame: None,
                brightness: None,
                fail: false,
            }
        }
    }

    impl SegmentBus for MockBus {
        fn write_segments(
            &mut self,
            clk: u8,
            dio: u8,
            segments: &[u8; DIGITS],
        ) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::NoAck);
            }
            self.frame = Some((clk, dio, *segments));
            Ok(())
        }

        fn set_brightness(&mut self, clk: u8, dio: u8, level: u8) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::NoAck);
            }
            self.brightness = Some((clk, dio, level));
            Ok(())
        }
    }

    #[test]
    fn test_show_addresses_pin_pair() {
        let mut bus = MockBus::new();
        let mut display = SegmentDisplay::new(4, 22);

        display.show(&mut bus, DisplayValue::Number(2015)).unwrap();

        let expected = DisplayValue::Number(2015).encode();
        assert_eq!(bus.frame, Some((4, 22, expected)));
        assert_eq!(display.last_frame(), Some(expected));
    }

    #[test]
    fn test_failed_write_keeps_previous_frame() {
        let mut bus = MockBus::new();
        let mut display = SegmentDisplay::new(4, 17);
        display.show(&mut bus, DisplayValue::Number(1955)).unwrap();

        bus.fail = true;
        assert_eq!(
            display.show(&mut bus, DisplayValue::Number(1885)),
            Err(DisplayError::NoAck)
        );
        assert_eq!(
            display.last_frame(),
            Some(DisplayValue::Number(1955).encode())
        );
    }

    #[test]
    fn test_brightness_is_clamped() {
        let mut bus = MockBus::new();
        let mut display = SegmentDisplay::new(4, 21);

        display.set_brightness(&mut bus, 12).unwrap();
        assert_eq!(display.brightness(), MAX_BRIGHTNESS);
        assert_eq!(bus.brightness, Some((4, 21, MAX_BRIGHTNESS)));

        display.set_brightness(&mut bus, 2).unwrap();
        assert_eq!(display.brightness(), 2);
    }
}
