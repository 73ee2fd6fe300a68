//! Decides whether a schedule rule fires on a calendar date.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::ScheduleRecord;

/// Occurrence of the date's weekday within its month, `ceil(day / 7)`.
///
/// Days 29-31 give 5.
pub fn week_of_month(date: NaiveDate) -> u8 {
    let week = date.day().div_ceil(7).clamp(1, 5);
    u8::try_from(week).unwrap_or(5)
}

/// Whether `record` is swept on the calendar date `date`.
///
/// The holiday flag is not consulted.
pub fn matches_on_date(record: &ScheduleRecord, date: NaiveDate) -> bool {
    if record.weekday != Some(date.weekday()) {
        return false;
    }
    record.week_flags.is_set(week_of_month(date))
}

/// Whether `record` is swept on the day containing `instant`, with the
/// calendar day taken in `time_zone`.
pub fn matches(record: &ScheduleRecord, instant: DateTime<Utc>, time_zone: Tz) -> bool {
    matches_on_date(record, instant.with_timezone(&time_zone).date_naive())
}
