//! Time display driver
//!
//! Polls the local time source on an interval and pushes the date and
//! time to the displays. Single-threaded: the host calls every method
//! from its one control loop.

use crate::config::{
    clamp_read_interval_s, ConfigRoot, LampConfig, PinAssignment, DEFAULT_BRIGHTNESS,
    DEFAULT_READ_INTERVAL_S,
};
use crate::display::{DisplayValue, SegmentDisplay};
use crate::time::LocalTime;
use crate::traits::display::MAX_BRIGHTNESS;
use crate::traits::{Level, Platform, PinOwner, Usermod, UsermodId};

/// Delay between `initialize` and the first render (ms)
///
/// Gives network time sync a chance to finish before anything is shown.
pub const BOOT_SETTLE_MS: u64 = 19_500;

/// Owner tag for every pin the lamp claims
pub const LAMP_OWNER: PinOwner = PinOwner::Usermod(UsermodId::BttfLamp);

/// Resolved lamp settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LampSettings {
    /// Time between renders (10 000 - 120 000 ms)
    pub update_interval_ms: u32,
    /// Display brightness (0-7)
    pub brightness: u8,
    /// GPIO assignment
    pub pins: PinAssignment,
}

impl Default for LampSettings {
    fn default() -> Self {
        Self {
            update_interval_ms: DEFAULT_READ_INTERVAL_S * 1000,
            brightness: DEFAULT_BRIGHTNESS,
            pins: PinAssignment::default(),
        }
    }
}

/// Result of one scheduler pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// `initialize` has not run (or the lamp was torn down)
    NotInitialized,
    /// Update interval has not elapsed yet
    Waiting,
    /// Time source has no time yet; retried on the next pass
    TimeUnavailable,
    /// Displays and indicators were updated
    Rendered {
        /// Time that was shown
        time: LocalTime,
        /// Number of displays that did not accept their frame
        display_errors: u8,
    },
}

/// Driver for the three time circuit displays and the AM/PM lamps
pub struct TimeDisplayDriver<P> {
    platform: P,
    settings: LampSettings,
    /// Year, date and time displays; present exactly while initialized.
    /// A module is left out if the lamp does not hold both of its pins.
    displays: Option<[Option<SegmentDisplay>; 3]>,
    /// Which of `settings.pins.all()` the lamp holds
    owned: [bool; 6],
    indicators_initialized: bool,
    /// Earliest time the next render may happen
    due_ms: u64,
    last_update_ms: Option<u64>,
}

impl<P: Platform> TimeDisplayDriver<P> {
    /// Create a driver with default settings
    pub fn new(platform: P) -> Self {
        Self::with_settings(platform, LampSettings::default())
    }

    /// Create a driver with explicit settings
    pub fn with_settings(platform: P, settings: LampSettings) -> Self {
        Self {
            platform,
            settings,
            displays: None,
            owned: [false; 6],
            indicators_initialized: false,
            due_ms: 0,
            last_update_ms: None,
        }
    }

    /// Claim the pins, create the display handles and schedule the
    /// first render `BOOT_SETTLE_MS` from now
    ///
    /// Pins owned by someone else are skipped without error and never
    /// driven afterwards. Calling this on a running driver rebuilds it.
    ///
    /// Returns the number of pins claimed.
    pub fn initialize(&mut self, now_ms: u64) -> usize {
        self.teardown();

        let pins = self.settings.pins;
        let claimed = pins
            .all()
            .iter()
            .filter(|&&pin| self.platform.claim(pin, true, LAMP_OWNER).is_ok())
            .count();

        self.owned = pins
            .all()
            .map(|pin| self.platform.owner_of(pin) == Some(LAMP_OWNER));

        let clk_owned = self.owns(pins.clk);
        let mut displays = pins.segments.map(|dio| {
            (clk_owned && self.owns(dio)).then(|| SegmentDisplay::new(pins.clk, dio))
        });
        for display in displays.iter_mut().flatten() {
            // The bus resends the level with every frame, so a module
            // that misses this picks it up on the next render
            let _ = display.set_brightness(&mut self.platform, self.settings.brightness);
        }
        self.displays = Some(displays);

        self.due_ms = now_ms.saturating_add(BOOT_SETTLE_MS);
        claimed
    }

    /// Release the pins and drop the display handles
    ///
    /// Does nothing if the driver is not initialized.
    pub fn teardown(&mut self) {
        if self.displays.is_none() {
            return;
        }
        let pins = self.settings.pins.all();
        for (pin, owned) in pins.into_iter().zip(self.owned) {
            if owned {
                let _ = self.platform.release(pin, LAMP_OWNER);
            }
        }
        self.owned = [false; 6];
        self.displays = None;
    }

    /// Scheduler pass
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        if !self.indicators_initialized {
            // Both lamps on until the time is known
            let pins = self.settings.pins;
            for pin in [pins.am, pins.pm] {
                if matches!(self.platform.owner_of(pin), None | Some(LAMP_OWNER)) {
                    self.platform.set_output(pin);
                    self.platform.write(pin, Level::High);
                }
            }
            self.indicators_initialized = true;
        }

        let Some(displays) = self.displays.as_mut() else {
            return TickOutcome::NotInitialized;
        };
        if now_ms < self.due_ms {
            return TickOutcome::Waiting;
        }

        let Some(time) = self.platform.local_time() else {
            return TickOutcome::TimeUnavailable;
        };

        let pins = self.settings.pins;
        let am = time.is_am();
        for (pin, lit) in [(pins.am, am), (pins.pm, !am)] {
            if owned_in(&pins.all(), &self.owned, pin) {
                self.platform.set_output(pin);
                self.platform.write(pin, Level::from_bool(lit));
            }
        }

        let values = frames_for(&time);
        let mut display_errors = 0;
        for (display, value) in displays.iter_mut().zip(values) {
            let Some(display) = display else { continue };
            if display.show(&mut self.platform, value).is_err() {
                display_errors += 1;
            }
        }

        self.last_update_ms = Some(now_ms);
        self.due_ms = now_ms.saturating_add(u64::from(self.settings.update_interval_ms));

        TickOutcome::Rendered {
            time,
            display_errors,
        }
    }

    /// Current settings as a config fragment
    pub fn serialize_config(&self) -> LampConfig {
        LampConfig {
            read_interval_s: Some((self.settings.update_interval_ms / 1000) as i32),
            brightness: Some(self.settings.brightness),
            pins: Some(self.settings.pins),
        }
    }

    /// Apply a config fragment
    ///
    /// Missing fields keep their current value. The interval is clamped
    /// to 10-120 s and brightness to 0-7. A running driver is torn down
    /// with its old pins and rebuilt with the new settings.
    ///
    /// Returns whether the fragment contained the update interval.
    pub fn apply_config(&mut self, config: &LampConfig, now_ms: u64) -> bool {
        let was_running = self.is_initialized();
        self.teardown();

        let current_s = (self.settings.update_interval_ms / 1000) as i32;
        let interval_s = clamp_read_interval_s(config.read_interval_s.unwrap_or(current_s));
        self.settings.update_interval_ms = interval_s * 1000;

        if let Some(brightness) = config.brightness {
            self.settings.brightness = brightness.min(MAX_BRIGHTNESS);
        }
        if let Some(pins) = config.pins {
            self.settings.pins = pins;
        }

        if was_running {
            self.initialize(now_ms);
        }

        config.read_interval_s.is_some()
    }

    /// Check if the displays are set up
    pub fn is_initialized(&self) -> bool {
        self.displays.is_some()
    }

    /// Check if the one-time indicator setup has run
    pub fn indicators_initialized(&self) -> bool {
        self.indicators_initialized
    }

    /// Current settings
    pub fn settings(&self) -> &LampSettings {
        &self.settings
    }

    /// Time of the last render
    pub fn last_update_ms(&self) -> Option<u64> {
        self.last_update_ms
    }

    /// Earliest time the next render may happen
    pub fn due_ms(&self) -> u64 {
        self.due_ms
    }

    /// Year, date and time display handles
    ///
    /// A slot is `None` when the lamp could not claim that module's pins.
    pub fn displays(&self) -> Option<&[Option<SegmentDisplay>; 3]> {
        self.displays.as_ref()
    }

    /// Check if the lamp holds `pin` from its last `initialize`
    pub fn owns(&self, pin: u8) -> bool {
        owned_in(&self.settings.pins.all(), &self.owned, pin)
    }

    /// The platform the driver runs on
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Mutable access to the platform
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }
}

impl<P: Platform> Usermod for TimeDisplayDriver<P> {
    type Outcome = TickOutcome;

    fn id(&self) -> UsermodId {
        UsermodId::BttfLamp
    }

    fn setup(&mut self, now_ms: u64) {
        self.initialize(now_ms);
    }

    fn tick(&mut self, now_ms: u64) -> TickOutcome {
        TimeDisplayDriver::tick(self, now_ms)
    }

    fn add_to_config(&self, root: &mut ConfigRoot) {
        root.lamp = Some(self.serialize_config());
    }

    fn read_from_config(&mut self, root: &ConfigRoot, now_ms: u64) -> bool {
        match root.lamp {
            Some(config) => self.apply_config(&config, now_ms),
            None => false,
        }
    }
}

fn owned_in(pins: &[u8; 6], owned: &[bool; 6], pin: u8) -> bool {
    pins.iter().zip(owned).any(|(&p, &held)| p == pin && held)
}

/// Year on the first display, month/day on the second and
/// hour:minute (12-hour dial) on the third
fn frames_for(time: &LocalTime) -> [DisplayValue; 3] {
    [
        DisplayValue::Number(time.year),
        DisplayValue::Pair {
            left: time.month,
            right: time.day,
            colon: false,
        },
        DisplayValue::Pair {
            left: time.hour12(),
            right: time.minute,
            colon: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_for_afternoon() {
        let time = LocalTime::new(2015, 10, 21, 16, 29, 0).unwrap();
        let [year, date, clock] = frames_for(&time);
        assert_eq!(year, DisplayValue::Number(2015));
        assert_eq!(
            date,
            DisplayValue::Pair {
                left: 10,
                right: 21,
                colon: false
            }
        );
        assert_eq!(
            clock,
            DisplayValue::Pair {
                left: 4,
                right: 29,
                colon: true
            }
        );
    }

    #[test]
    fn test_default_settings_in_range() {
        let settings = LampSettings::default();
        assert!((10_000..=120_000).contains(&settings.update_interval_ms));
        assert!(settings.brightness <= MAX_BRIGHTNESS);
    }
}
