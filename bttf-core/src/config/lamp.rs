//! Lamp configuration
//!
//! The lamp stores its settings under its own namespace in the host
//! config tree:
//!
//! ```toml
//! [time]
//! utc-offset-h = 2
//!
//! [BTTFLamp]
//! read-interval-s = 60
//! brightness = 7
//!
//! [BTTFLamp.pins]
//! segment-pins = [22, 17, 21]
//! am-pin = 18
//! pm-pin = 19
//! clk-pin = 4
//! ```

use serde::{Deserialize, Serialize};

/// Namespace of the lamp in the host config tree
pub const CONFIG_NAMESPACE: &str = "BTTFLamp";

/// Key of the update interval inside the lamp namespace
pub const READ_INTERVAL_KEY: &str = "read-interval-s";

/// Shortest allowed update interval (seconds)
pub const MIN_READ_INTERVAL_S: u32 = 10;

/// Longest allowed update interval (seconds)
pub const MAX_READ_INTERVAL_S: u32 = 120;

/// Update interval used until a config is loaded (seconds)
pub const DEFAULT_READ_INTERVAL_S: u32 = MIN_READ_INTERVAL_S;

/// Display brightness used until a config is loaded (0-7)
pub const DEFAULT_BRIGHTNESS: u8 = 7;

/// Clamp an update interval to the allowed range
pub fn clamp_read_interval_s(seconds: i32) -> u32 {
    seconds.clamp(MIN_READ_INTERVAL_S as i32, MAX_READ_INTERVAL_S as i32) as u32
}

/// GPIO assignment of the lamp
///
/// The three display modules share `clk`; each has its own data pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment {
    /// Data pins of the year, date and time displays
    #[serde(rename = "segment-pins")]
    pub segments: [u8; 3],
    /// AM indicator lamp
    #[serde(rename = "am-pin")]
    pub am: u8,
    /// PM indicator lamp
    #[serde(rename = "pm-pin")]
    pub pm: u8,
    /// Shared display clock
    #[serde(rename = "clk-pin")]
    pub clk: u8,
}

impl Default for PinAssignment {
    fn default() -> Self {
        Self {
            segments: [22, 17, 21],
            am: 18,
            pm: 19,
            clk: 4,
        }
    }
}

impl PinAssignment {
    /// Every pin the lamp uses, in claim order
    pub fn all(&self) -> [u8; 6] {
        [
            self.segments[0],
            self.segments[1],
            self.segments[2],
            self.am,
            self.pm,
            self.clk,
        ]
    }
}

/// Lamp section of the config tree
///
/// Every field is optional; missing fields keep their current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LampConfig {
    /// Update interval in seconds (clamped to 10-120 when applied)
    #[serde(rename = "read-interval-s", default)]
    pub read_interval_s: Option<i32>,
    /// Display brightness (clamped to 0-7 when applied)
    #[serde(default)]
    pub brightness: Option<u8>,
    /// GPIO assignment
    #[serde(default)]
    pub pins: Option<PinAssignment>,
}

/// Wall-clock settings shared by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeConfig {
    /// Whole-hour offset from UTC, including summer time
    #[serde(rename = "utc-offset-h", default)]
    pub utc_offset_h: i8,
}

/// Root of the host config tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigRoot {
    /// Config version
    #[serde(default = "ConfigRoot::current_version")]
    pub version: u8,
    /// Time zone settings
    #[serde(default)]
    pub time: TimeConfig,
    /// Lamp namespace
    #[serde(rename = "BTTFLamp", default)]
    pub lamp: Option<LampConfig>,
}

impl ConfigRoot {
    /// Current config version
    pub const VERSION: u8 = 1;

    fn current_version() -> u8 {
        Self::VERSION
    }

    /// Create an empty config tree
    pub fn new() -> Self {
        Self {
            version: Self::VERSION,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_read_interval() {
        assert_eq!(clamp_read_interval_s(5), 10);
        assert_eq!(clamp_read_interval_s(-3), 10);
        assert_eq!(clamp_read_interval_s(60), 60);
        assert_eq!(clamp_read_interval_s(999), 120);
    }

    #[test]
    fn test_default_pins_are_distinct() {
        let pins = PinAssignment::default().all();
        for (i, a) in pins.iter().enumerate() {
            assert!(pins[i + 1..].iter().all(|b| b != a));
        }
    }

    #[test]
    fn test_new_sets_version() {
        let root = ConfigRoot::new();
        assert_eq!(root.version, ConfigRoot::VERSION);
        assert!(root.lamp.is_none());
    }
}
