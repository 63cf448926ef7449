//! Local wall-clock time

use crate::time::LocalTime;

/// Source of calendar time in the configured time zone
pub trait LocalTimeSource {
    /// Current local time
    ///
    /// Returns `None` while the time is not known yet (for example
    /// before network time sync has completed or the RTC was set).
    fn local_time(&mut self) -> Option<LocalTime>;
}
