//! Property tests for the time display driver

mod common;

use proptest::prelude::*;

use bttf_core::config::{clamp_read_interval_s, LampConfig, PinAssignment};
use bttf_core::display::DisplayValue;
use bttf_core::lamp::{TickOutcome, TimeDisplayDriver, BOOT_SETTLE_MS, LAMP_OWNER};
use bttf_core::time::LocalTime;
use bttf_core::traits::Level;

use common::{Event, MockPlatform};

fn local_time() -> impl Strategy<Value = LocalTime> {
    (1970u16..2100, 1u8..=12, 1u8..=28, 0u8..24, 0u8..60, 0u8..60)
        .prop_map(|(y, mo, d, h, mi, s)| LocalTime::new(y, mo, d, h, mi, s).unwrap())
}

/// Six distinct pins below 30, with the last one shared as clock
fn pin_assignment() -> impl Strategy<Value = PinAssignment> {
    Just((0u8..30).collect::<Vec<_>>())
        .prop_shuffle()
        .prop_map(|pins| PinAssignment {
            segments: [pins[0], pins[1], pins[2]],
            am: pins[3],
            pm: pins[4],
            clk: pins[5],
        })
}

proptest! {
    /// Any stored interval lands inside 10-120 s
    #[test]
    fn interval_always_clamped(seconds in any::<i32>()) {
        let mut lamp = TimeDisplayDriver::new(MockPlatform::new());
        lamp.apply_config(&LampConfig { read_interval_s: Some(seconds), ..Default::default() }, 0);

        let ms = lamp.settings().update_interval_ms;
        prop_assert!((10_000..=120_000).contains(&ms));
        prop_assert_eq!(ms, clamp_read_interval_s(seconds) * 1000);
        if (10..=120).contains(&seconds) {
            prop_assert_eq!(ms, seconds as u32 * 1000);
        }
    }

    /// Renders are never closer together than the interval, and the first
    /// never comes before the settle delay
    #[test]
    fn renders_respect_interval(
        interval_s in 10i32..=120,
        steps in prop::collection::vec(1u64..20_000, 1..200),
    ) {
        let mut lamp = TimeDisplayDriver::new(MockPlatform::with_time(
            LocalTime::new(1985, 10, 26, 1, 21, 0).unwrap(),
        ));
        lamp.apply_config(&LampConfig { read_interval_s: Some(interval_s), ..Default::default() }, 0);
        lamp.initialize(0);

        let interval_ms = interval_s as u64 * 1000;
        let mut now = 0;
        let mut last: Option<u64> = None;
        for step in steps {
            now += step;
            if let TickOutcome::Rendered { .. } = lamp.tick(now) {
                match last {
                    None => prop_assert!(now >= BOOT_SETTLE_MS),
                    Some(prev) => prop_assert!(now - prev >= interval_ms),
                }
                last = Some(now);
            }
        }
    }

    /// After a render exactly one indicator is lit
    #[test]
    fn indicators_exclusive_after_render(time in local_time()) {
        let mut lamp = TimeDisplayDriver::new(MockPlatform::with_time(time));
        lamp.initialize(0);
        lamp.tick(BOOT_SETTLE_MS);

        let pins = lamp.settings().pins;
        let am = lamp.platform().level(pins.am);
        let pm = lamp.platform().level(pins.pm);
        prop_assert_eq!(am == Some(Level::High), time.hour < 12);
        prop_assert_eq!(pm == Some(Level::High), time.hour >= 12);
        prop_assert!(lamp.platform().is_output(pins.am));
        prop_assert!(lamp.platform().is_output(pins.pm));
    }

    /// Rendered frames match the shown time
    #[test]
    fn frames_follow_time(time in local_time()) {
        let mut lamp = TimeDisplayDriver::new(MockPlatform::with_time(time));
        lamp.initialize(0);
        lamp.tick(BOOT_SETTLE_MS);

        let pins = lamp.settings().pins;
        let platform = lamp.platform();
        prop_assert_eq!(platform.frame(pins.segments[0]), Some(DisplayValue::Number(time.year).encode()));
        prop_assert_eq!(
            platform.frame(pins.segments[2]),
            Some(DisplayValue::Pair { left: time.hour12(), right: time.minute, colon: true }.encode())
        );
    }

    /// Reconfiguring pins never leaves a pin claimed twice or a stale claim behind
    #[test]
    fn reconfig_never_double_claims(
        assignments in prop::collection::vec(pin_assignment(), 1..8),
    ) {
        let mut lamp = TimeDisplayDriver::new(MockPlatform::new());
        lamp.initialize(0);

        for (i, pins) in assignments.into_iter().enumerate() {
            lamp.apply_config(&LampConfig { pins: Some(pins), ..Default::default() }, i as u64);

            let registry = &lamp.platform().registry;
            prop_assert_eq!(registry.claimed_by(LAMP_OWNER), 6);
            prop_assert_eq!(registry.claimed_count(), 6);
        }
        prop_assert!(lamp.platform().claims_never_overlap());

        lamp.teardown();
        prop_assert_eq!(lamp.platform().registry.claimed_count(), 0);
    }

    /// A pin held by someone else is never driven, whichever one it is
    #[test]
    fn foreign_pin_never_driven(index in 0usize..6, time in local_time()) {
        let pins = PinAssignment::default();
        let foreign = pins.all()[index];
        let mut platform = MockPlatform::with_time(time);
        platform.registry.reserve(foreign).unwrap();
        let mut lamp = TimeDisplayDriver::new(platform);

        prop_assert_eq!(lamp.initialize(0), 5);
        lamp.tick(0);
        lamp.tick(BOOT_SETTLE_MS);
        lamp.teardown();

        let driven = lamp.platform().events.iter().any(|e| match *e {
            Event::SetOutput(pin) | Event::Write(pin, _) => pin == foreign,
            Event::Segments { clk, dio, .. } | Event::Brightness { clk, dio, .. } => {
                clk == foreign || dio == foreign
            }
            _ => false,
        });
        prop_assert!(!driven);
        prop_assert_eq!(lamp.platform().registry.claimed_count(), 1);
    }

    /// Unix time round-trips through local time at any whole-hour offset
    #[test]
    fn unix_round_trip(secs in 0i64..4_102_444_800, offset in -12i8..=14) {
        let local = LocalTime::from_unix(secs, offset).unwrap();
        prop_assert_eq!(local.to_unix(offset), Some(secs));
    }
}
