//! Seven-segment digit encoding
//!
//! Segment layout:
//! ```text
//!    AAAAA
//!   F     B
//!   F     B
//!    GGGGG
//!   E     C
//!   E     C
//!    DDDDD
//! ```
//!
//! Bits follow the TM1637 convention: A is bit 0, G is bit 6 and bit 7
//! drives the colon (or decimal point) of a cell.

use crate::traits::display::DIGITS;

/// Segment bits of one digit cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segments(pub u8);

impl Segments {
    pub const A: u8 = 0b0000_0001;
    pub const B: u8 = 0b0000_0010;
    pub const C: u8 = 0b0000_0100;
    pub const D: u8 = 0b0000_1000;
    pub const E: u8 = 0b0001_0000;
    pub const F: u8 = 0b0010_0000;
    pub const G: u8 = 0b0100_0000;
    /// Colon between the second and third cell (lit through cell 1)
    pub const COLON: u8 = 0b1000_0000;

    const DIGIT_TABLE: [u8; 10] = [
        Self::A | Self::B | Self::C | Self::D | Self::E | Self::F,
        Self::B | Self::C,
        Self::A | Self::B | Self::D | Self::E | Self::G,
        Self::A | Self::B | Self::C | Self::D | Self::G,
        Self::B | Self::C | Self::F | Self::G,
        Self::A | Self::C | Self::D | Self::F | Self::G,
        Self::A | Self::C | Self::D | Self::E | Self::F | Self::G,
        Self::A | Self::B | Self::C,
        Self::A | Self::B | Self::C | Self::D | Self::E | Self::F | Self::G,
        Self::A | Self::B | Self::C | Self::D | Self::F | Self::G,
    ];

    /// Segments for a decimal digit (0-9)
    pub fn from_digit(digit: u8) -> Option<Self> {
        Self::DIGIT_TABLE.get(digit as usize).map(|&bits| Self(bits))
    }
}

/// Value shown on one four-digit module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayValue {
    /// Right-aligned, zero-padded number (values above 9999 show 9999)
    Number(u16),
    /// Two zero-padded two-digit groups, e.g. hours and minutes
    Pair {
        left: u8,
        right: u8,
        /// Light the colon between the groups
        colon: bool,
    },
}

impl DisplayValue {
    /// Encode into one frame of segment bits, leftmost cell first
    pub fn encode(&self) -> [u8; DIGITS] {
        match *self {
            DisplayValue::Number(value) => {
                let value = value.min(9999);
                [
                    digit_bits((value / 1000) as u8),
                    digit_bits((value / 100 % 10) as u8),
                    digit_bits((value / 10 % 10) as u8),
                    digit_bits((value % 10) as u8),
                ]
            }
            DisplayValue::Pair { left, right, colon } => {
                let left = left.min(99);
                let right = right.min(99);
                let mut frame = [
                    digit_bits(left / 10),
                    digit_bits(left % 10),
                    digit_bits(right / 10),
                    digit_bits(right % 10),
                ];
                if colon {
                    frame[1] |= Segments::COLON;
                }
                frame
            }
        }
    }
}

fn digit_bits(digit: u8) -> u8 {
    Segments::from_digit(digit).unwrap_or_default().0
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0x3f 0x06 0x5b 0x4f 0x66 0x6d 0x7d 0x07 0x7f 0x6f is the usual TM1637 font
    const FONT: [u8; 10] = [0x3f, 0x06, 0x5b, 0x4f, 0x66, 0x6d, 0x7d, 0x07, 0x7f, 0x6f];

    #[test]
    fn test_digit_font() {
        for (digit, &bits) in FONT.iter().enumerate() {
            assert_eq!(Segments::from_digit(digit as u8), Some(Segments(bits)));
        }
        assert_eq!(Segments::from_digit(10), None);
    }

    #[test]
    fn test_number_is_zero_padded() {
        assert_eq!(
            DisplayValue::Number(1985).encode(),
            [FONT[1], FONT[9], FONT[8], FONT[5]]
        );
        assert_eq!(
            DisplayValue::Number(42).encode(),
            [FONT[0], FONT[0], FONT[4], FONT[2]]
        );
    }

    #[test]
    fn test_number_clamps() {
        assert_eq!(DisplayValue::Number(12345).encode(), [FONT[9]; 4]);
    }

    #[test]
    fn test_pair_with_colon() {
        let frame = DisplayValue::Pair {
            left: 1,
            right: 21,
            colon: true,
        }
        .encode();
        assert_eq!(frame, [FONT[0], FONT[1] | Segments::COLON, FONT[2], FONT[1]]);
        assert_ne!(frame[1] & Segments::COLON, 0);
    }

    #[test]
    fn test_pair_without_colon() {
        let frame = DisplayValue::Pair {
            left: 10,
            right: 26,
            colon: false,
        }
        .encode();
        assert_eq!(frame, [FONT[1], FONT[0], FONT[2], FONT[6]]);
    }
}
