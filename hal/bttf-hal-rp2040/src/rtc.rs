//! RTC-backed local time source
//!
//! The RTC keeps UTC. The configured offset is applied on every read,
//! so changing it never touches the hardware clock.

use bttf_core::time::LocalTime;
use bttf_core::traits::LocalTimeSource;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use embassy_rp::peripherals::RTC;
use embassy_rp::rtc::{DayOfWeek, Rtc};
use embassy_rp::Peri;

/// Last year the RTC's 12-bit year field holds
const MAX_RTC_YEAR: i32 = 4095;

/// Errors from setting the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Timestamp outside the range the RTC can hold
    OutOfRange,
    /// RTC rejected the date
    Rejected,
}

/// Local time from the RP2040 RTC
pub struct RtcTime {
    rtc: Rtc<'static, RTC>,
    utc_offset_h: i8,
}

impl RtcTime {
    /// Wrap the RTC peripheral
    pub fn new(rtc: Peri<'static, RTC>, utc_offset_h: i8) -> Self {
        Self {
            rtc: Rtc::new(rtc),
            utc_offset_h,
        }
    }

    /// Check if the RTC has been set since power-up
    pub fn is_running(&self) -> bool {
        self.rtc.is_running()
    }

    /// Set the RTC from Unix seconds (UTC)
    pub fn set_unix(&mut self, secs: i64) -> Result<(), ClockError> {
        let utc = DateTime::from_timestamp(secs, 0)
            .ok_or(ClockError::OutOfRange)?
            .naive_utc();
        if !(0..=MAX_RTC_YEAR).contains(&utc.year()) {
            return Err(ClockError::OutOfRange);
        }
        self.rtc
            .set_datetime(to_datetime(&utc))
            .map_err(|_| ClockError::Rejected)
    }

    fn utc(&self) -> Option<NaiveDateTime> {
        if !self.rtc.is_running() {
            return None;
        }
        let now = self.rtc.now().ok()?;
        NaiveDate::from_ymd_opt(i32::from(now.year), u32::from(now.month), u32::from(now.day))?
            .and_hms_opt(
                u32::from(now.hour),
                u32::from(now.minute),
                u32::from(now.second),
            )
    }
}

impl LocalTimeSource for RtcTime {
    fn local_time(&mut self) -> Option<LocalTime> {
        let utc = self.utc()?;
        LocalTime::from_unix(utc.and_utc().timestamp(), self.utc_offset_h)
    }
}

fn to_datetime(utc: &NaiveDateTime) -> embassy_rp::rtc::DateTime {
    let day_of_week = match utc.weekday() {
        Weekday::Sun => DayOfWeek::Sunday,
        Weekday::Mon => DayOfWeek::Monday,
        Weekday::Tue => DayOfWeek::Tuesday,
        Weekday::Wed => DayOfWeek::Wednesday,
        Weekday::Thu => DayOfWeek::Thursday,
        Weekday::Fri => DayOfWeek::Friday,
        Weekday::Sat => DayOfWeek::Saturday,
    };
    // Year range checked by the caller
    embassy_rp::rtc::DateTime {
        year: utc.year() as u16,
        month: utc.month() as u8,
        day: utc.day() as u8,
        day_of_week,
        hour: utc.hour() as u8,
        minute: utc.minute() as u8,
        second: utc.second() as u8,
    }
}
