use serde::Serialize;

use super::ScheduleRecord;
use crate::geometry::CleanedSide;
use crate::{Hour, LatLng};

/// Render-ready projection of a schedule record for one matched date
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreetSegment {
    pub cnn: String,
    pub corridor: String,
    pub limits: String,
    pub side: String,
    pub week_day: String,
    pub from_hour: Hour,
    pub to_hour: Hour,
    pub time_display: String,
    /// Centerline, offset line, or the highlighted corridor ring
    pub coordinates: Vec<LatLng>,
    #[serde(flatten)]
    pub corridor_polygons: Option<CorridorPolygons>,
}

/// Both halves of a split street corridor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorridorPolygons {
    pub left_polygon: Vec<LatLng>,
    pub right_polygon: Vec<LatLng>,
    pub cleaned_side: CleanedSide,
}

impl CorridorPolygons {
    /// The ring of the half that is being swept.
    pub fn cleaned_polygon(&self) -> &[LatLng] {
        match self.cleaned_side {
            CleanedSide::Left => &self.left_polygon,
            CleanedSide::Right => &self.right_polygon,
        }
    }
}

impl StreetSegment {
    pub(crate) fn from_record(
        record: &ScheduleRecord,
        coordinates: Vec<LatLng>,
        corridor_polygons: Option<CorridorPolygons>,
    ) -> Self {
        Self {
            cnn: record.cnn.clone(),
            corridor: record.corridor.clone(),
            limits: record.limits.clone(),
            side: record.side_label.clone(),
            week_day: record.weekday_label.clone(),
            from_hour: record.from_hour,
            to_hour: record.to_hour,
            time_display: time_display(record.from_hour, record.to_hour),
            coordinates,
            corridor_polygons,
        }
    }
}

/// Formats an hour of day as a 12-hour clock label, e.g. `0 -> 12AM`, `14 -> 2PM`.
pub fn format_hour(hour: Hour) -> String {
    match hour {
        0 => "12AM".to_string(),
        1..=11 => format!("{hour}AM"),
        12 => "12PM".to_string(),
        _ => format!("{}PM", hour - 12),
    }
}

pub fn time_display(from_hour: Hour, to_hour: Hour) -> String {
    format!("{} - {}", format_hour(from_hour), format_hour(to_hour))
}
