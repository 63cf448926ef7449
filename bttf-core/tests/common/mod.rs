//! Recording mock platform shared by the integration tests

#![allow(dead_code)]

use std::collections::HashMap;

use bttf_core::display::DisplayValue;
use bttf_core::registry::PinRegistry;
use bttf_core::time::LocalTime;
use bttf_core::traits::display::DIGITS;
use bttf_core::traits::{
    DisplayError, GpioBank, Level, LocalTimeSource, PinError, PinOwner, PinOwnership, SegmentBus,
};

/// Everything the driver did to the platform, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Claim { pin: u8, ok: bool },
    Release { pin: u8, ok: bool },
    SetOutput(u8),
    Write(u8, Level),
    Segments { clk: u8, dio: u8, frame: [u8; DIGITS] },
    Brightness { clk: u8, dio: u8, level: u8 },
    TimeQuery,
}

pub struct MockPlatform {
    pub registry: PinRegistry,
    pub events: Vec<Event>,
    pub outputs: HashMap<u8, bool>,
    pub levels: HashMap<u8, Level>,
    pub frames: HashMap<u8, [u8; DIGITS]>,
    pub brightness: HashMap<u8, u8>,
    pub time: Option<LocalTime>,
    pub failing_dio: Option<u8>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            registry: PinRegistry::new(),
            events: Vec::new(),
            outputs: HashMap::new(),
            levels: HashMap::new(),
            frames: HashMap::new(),
            brightness: HashMap::new(),
            time: None,
            failing_dio: None,
        }
    }

    pub fn with_time(time: LocalTime) -> Self {
        let mut platform = Self::new();
        platform.time = Some(time);
        platform
    }

    pub fn level(&self, pin: u8) -> Option<Level> {
        self.levels.get(&pin).copied()
    }

    pub fn is_output(&self, pin: u8) -> bool {
        self.outputs.get(&pin).copied().unwrap_or(false)
    }

    pub fn frame(&self, dio: u8) -> Option<[u8; DIGITS]> {
        self.frames.get(&dio).copied()
    }

    pub fn segment_writes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Segments { .. }))
            .count()
    }

    /// Checks that no pin was ever claimed twice without a release in between
    pub fn claims_never_overlap(&self) -> bool {
        let mut held: HashMap<u8, bool> = HashMap::new();
        for event in &self.events {
            match *event {
                Event::Claim { pin, ok: true } => {
                    if held.insert(pin, true) == Some(true) {
                        return false;
                    }
                }
                Event::Release { pin, ok: true } => {
                    held.insert(pin, false);
                }
                _ => {}
            }
        }
        true
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl PinOwnership for MockPlatform {
    fn claim(&mut self, pin: u8, output: bool, owner: PinOwner) -> Result<(), PinError> {
        let result = self.registry.claim(pin, output, owner);
        self.events.push(Event::Claim {
            pin,
            ok: result.is_ok(),
        });
        result
    }

    fn release(&mut self, pin: u8, owner: PinOwner) -> Result<(), PinError> {
        let result = self.registry.release(pin, owner);
        self.events.push(Event::Release {
            pin,
            ok: result.is_ok(),
        });
        result
    }

    fn owner_of(&self, pin: u8) -> Option<PinOwner> {
        self.registry.owner_of(pin)
    }
}

impl GpioBank for MockPlatform {
    fn set_output(&mut self, pin: u8) {
        self.outputs.insert(pin, true);
        self.events.push(Event::SetOutput(pin));
    }

    fn set_input(&mut self, pin: u8) {
        self.outputs.insert(pin, false);
    }

    fn write(&mut self, pin: u8, level: Level) {
        self.levels.insert(pin, level);
        self.events.push(Event::Write(pin, level));
    }

    fn read(&mut self, pin: u8) -> Level {
        self.level(pin).unwrap_or(Level::Low)
    }
}

impl SegmentBus for MockPlatform {
    fn write_segments(
        &mut self,
        clk: u8,
        dio: u8,
        segments: &[u8; DIGITS],
    ) -> Result<(), DisplayError> {
        if self.failing_dio == Some(dio) {
            return Err(DisplayError::NoAck);
        }
        self.frames.insert(dio, *segments);
        self.events.push(Event::Segments {
            clk,
            dio,
            frame: *segments,
        });
        Ok(())
    }

    fn set_brightness(&mut self, clk: u8, dio: u8, level: u8) -> Result<(), DisplayError> {
        self.brightness.insert(dio, level);
        self.events.push(Event::Brightness { clk, dio, level });
        Ok(())
    }
}

impl LocalTimeSource for MockPlatform {
    fn local_time(&mut self) -> Option<LocalTime> {
        self.events.push(Event::TimeQuery);
        self.time
    }
}

pub fn time(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> LocalTime {
    LocalTime::new(year, month, day, hour, minute, 0).unwrap()
}

pub fn pair(left: u8, right: u8, colon: bool) -> [u8; DIGITS] {
    DisplayValue::Pair { left, right, colon }.encode()
}

pub fn number(value: u16) -> [u8; DIGITS] {
    DisplayValue::Number(value).encode()
}
