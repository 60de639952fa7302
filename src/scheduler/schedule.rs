//! Weekly trigger slots.

use chrono::{DateTime, Datelike, Duration, TimeZone, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A weekday and a wall-clock time, e.g. Monday 20:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub weekday: Weekday,
    pub hour: u32,
    pub minute: u32,
}

impl WeeklySchedule {
    pub const fn new(weekday: Weekday, hour: u32, minute: u32) -> Self {
        Self {
            weekday,
            hour,
            minute,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.hour < 24 && self.minute < 60
    }

    /// First slot strictly after `now`, in `now`'s time zone.
    ///
    /// Slots that fall into a DST gap are skipped to the following week.
    /// Returns `None` for an invalid schedule.
    pub fn next_fire_after<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        if !self.is_valid() {
            return None;
        }

        let tz = now.timezone();
        let today = now.date_naive();
        (0..=14)
            .filter_map(|offset| today.checked_add_signed(Duration::days(offset)))
            .filter(|day| day.weekday() == self.weekday)
            .filter_map(|day| day.and_hms_opt(self.hour, self.minute, 0))
            .filter_map(|naive| tz.from_local_datetime(&naive).earliest())
            .find(|candidate| candidate > now)
    }

    /// Time to sleep from `now` until the next slot.
    pub fn duration_until_next<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<std::time::Duration> {
        let next = self.next_fire_after(now)?;
        (next - now.clone()).to_std().ok()
    }
}

impl fmt::Display for WeeklySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}:{:02}", self.weekday, self.hour, self.minute)
    }
}
