use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use super::error::ScheduleError;

/// Half-open interval `[start, end)` in studio wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds a range from a start instant and a length in minutes.
    pub fn with_duration(start: NaiveDateTime, minutes: i64) -> Result<Self, ScheduleError> {
        let end = Duration::try_minutes(minutes)
            .and_then(|length| start.checked_add_signed(length))
            .ok_or(ScheduleError::InvalidDuration(minutes))?;
        Self::new(start, end)
    }

    /// The one-hour slot `[day@hour:00, day@hour+1:00)`.
    pub fn hour_slot(day: NaiveDate, hour: u32) -> Result<Self, ScheduleError> {
        let start = day
            .and_hms_opt(hour, 0, 0)
            .ok_or(ScheduleError::InvalidHour(hour))?;
        Self::new(start, start + Duration::hours(1))
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains(&self, other: &TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_minutes()
    }

    pub fn minutes_since_midnight(&self) -> i64 {
        i64::from(self.start.hour()) * 60 + i64::from(self.start.minute())
    }

    /// An end of exactly midnight after the start day still counts as one day.
    pub fn is_single_day(&self) -> bool {
        let day = self.start.date();
        if self.end.date() == day {
            return true;
        }
        self.end.time() == NaiveTime::MIN && day.succ_opt() == Some(self.end.date())
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.start.format("%Y-%m-%d"),
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

pub fn overlaps(a: &TimeRange, b: &TimeRange) -> bool {
    a.overlaps(b)
}

#[cfg(test)]
pub(crate) fn at(day: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    day.and_hms_opt(hour, minute, 0).unwrap()
}
