//! Calendar time
//!
//! Broken-down local time as shown on the displays. Conversions go
//! through `chrono`.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Broken-down local time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocalTime {
    /// Full year (e.g. 1985)
    pub year: u16,
    /// Month (1-12)
    pub month: u8,
    /// Day of month (1-31)
    pub day: u8,
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59)
    pub second: u8,
}

impl LocalTime {
    /// Create a local time from calendar fields
    ///
    /// Returns `None` if any field is out of range.
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Option<Self> {
        let naive = NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))?
            .and_hms_opt(u32::from(hour), u32::from(minute), u32::from(second))?;
        Self::from_naive(&naive)
    }

    /// Take the fields of a `chrono` date and time
    ///
    /// Returns `None` outside years 0-9999 (four display digits).
    pub fn from_naive(naive: &NaiveDateTime) -> Option<Self> {
        let year = u16::try_from(naive.year()).ok().filter(|&y| y <= 9999)?;
        Some(Self {
            year,
            month: naive.month() as u8,
            day: naive.day() as u8,
            hour: naive.hour() as u8,
            minute: naive.minute() as u8,
            second: naive.second() as u8,
        })
    }

    /// As a `chrono` date and time, `None` if the fields are invalid
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )?
        .and_hms_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second),
        )
    }

    /// Convert Unix seconds to local time at a whole-hour UTC offset
    ///
    /// Returns `None` if the result falls outside years 0-9999.
    pub fn from_unix(secs: i64, utc_offset_h: i8) -> Option<Self> {
        let offset = FixedOffset::east_opt(i32::from(utc_offset_h) * 3600)?;
        let utc = DateTime::from_timestamp(secs, 0)?;
        Self::from_naive(&utc.with_timezone(&offset).naive_local())
    }

    /// Convert back to Unix seconds, given the UTC offset this time is in
    pub fn to_unix(&self, utc_offset_h: i8) -> Option<i64> {
        let local = self.to_naive()?.and_utc().timestamp();
        Some(local - i64::from(utc_offset_h) * 3600)
    }

    /// Check if this time is before noon
    pub fn is_am(&self) -> bool {
        self.hour < 12
    }

    /// Hour on a 12-hour dial (1-12)
    pub fn hour12(&self) -> u8 {
        match self.hour % 12 {
            0 => 12,
            h => h,
        }
    }
}
