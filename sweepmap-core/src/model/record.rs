use chrono::{Datelike, NaiveDate, Weekday};
use geo::LineString;

use super::BlockSide;
use crate::Hour;

/// Five positional flags, one per occurrence of the weekday in a month.
///
/// Index 0 is the first occurrence (days 1-7), index 4 the fifth (days 29-31).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekFlags(pub [bool; 5]);

impl WeekFlags {
    pub const EVERY_WEEK: WeekFlags = WeekFlags([true; 5]);

    /// Whether the rule is active in the given week of month (1-5).
    /// Out of range indices are clamped.
    pub fn is_set(&self, week_index: u8) -> bool {
        let idx = usize::from(week_index.clamp(1, 5)) - 1;
        self.0[idx]
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|flag| *flag)
    }
}

impl From<[bool; 5]> for WeekFlags {
    fn from(flags: [bool; 5]) -> Self {
        Self(flags)
    }
}

/// One sweeping rule of the source dataset
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRecord {
    /// Centerline network number of the street segment
    pub cnn: String,
    pub corridor: String,
    /// Free text cross street limits, e.g. "Jackson St  -  Pacific Ave"
    pub limits: String,
    /// Block side label as written in the dataset
    pub side_label: String,
    pub block_side: BlockSide,
    /// Weekday label as written in the dataset ("Mon", "Tues", ...)
    pub weekday_label: String,
    /// Parsed weekday, `None` if the label is not a known weekday token
    pub weekday: Option<Weekday>,
    pub from_hour: Hour,
    pub to_hour: Hour,
    pub week_flags: WeekFlags,
    /// Parsed but never consulted when matching dates
    pub holiday: bool,
    /// Centerline with x = longitude, y = latitude
    pub geometry: LineString<f64>,
}

impl ScheduleRecord {
    pub fn has_geometry(&self) -> bool {
        !self.geometry.0.is_empty()
    }
}

/// Weekday abbreviation used by the dataset.
pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tues",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

/// Parses a dataset weekday abbreviation. `Tue` is accepted next to `Tues`.
pub fn parse_weekday_label(label: &str) -> Option<Weekday> {
    match label.trim() {
        "Sun" => Some(Weekday::Sun),
        "Mon" => Some(Weekday::Mon),
        "Tues" | "Tue" => Some(Weekday::Tue),
        "Wed" => Some(Weekday::Wed),
        "Thu" => Some(Weekday::Thu),
        "Fri" => Some(Weekday::Fri),
        "Sat" => Some(Weekday::Sat),
        _ => None,
    }
}
