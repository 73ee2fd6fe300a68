use chrono::{DateTime, Days, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

use crate::Error;

/// Calendar date of `instant` in the reference time zone.
pub fn local_date(instant: DateTime<Utc>, time_zone: Tz) -> NaiveDate {
    instant.with_timezone(&time_zone).date_naive()
}

/// `YYYY-MM-DD`
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// # Errors
///
/// Returns an error if the key is not a valid `YYYY-MM-DD` date.
pub fn parse_date_key(key: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d")
        .map_err(|e| Error::InvalidData(format!("Invalid date '{key}': {e}")))
}

/// Date a viewer most likely cares about: today until `cutoff_hour` local
/// time, tomorrow afterwards.
pub fn default_date(instant: DateTime<Utc>, time_zone: Tz, cutoff_hour: u32) -> NaiveDate {
    let local = instant.with_timezone(&time_zone);
    let today = local.date_naive();
    if local.hour() < cutoff_hour {
        today
    } else {
        today.succ_opt().unwrap_or(today)
    }
}

/// Ordered set of calendar dates the schedule is evaluated against
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateHorizon {
    dates: Vec<NaiveDate>,
}

impl DateHorizon {
    pub fn from_dates(dates: Vec<NaiveDate>) -> Self {
        Self { dates }
    }

    /// `days` consecutive dates starting with the local date of `instant`.
    pub fn starting_at(instant: DateTime<Utc>, time_zone: Tz, days: u32) -> Self {
        let first = local_date(instant, time_zone);
        let dates = (0..days)
            .map_while(|offset| first.checked_add_days(Days::new(u64::from(offset))))
            .collect();
        Self { dates }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn keys(&self) -> Vec<String> {
        self.dates.iter().copied().map(date_key).collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
