//! Date handling and the per-date output of the aggregation

mod export;
mod horizon;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

pub use export::segments_to_geojson;
pub use horizon::{DateHorizon, date_key, default_date, local_date, parse_date_key};

use crate::StreetSegment;

/// Street segments swept on each date of a horizon
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepingCalendar {
    pub segments_by_date: BTreeMap<String, Vec<StreetSegment>>,
    pub dates: Vec<String>,
}

impl SweepingCalendar {
    /// A calendar with every horizon date present and no segments.
    pub fn empty(horizon: &DateHorizon) -> Self {
        let dates = horizon.keys();
        let segments_by_date = dates.iter().map(|key| (key.clone(), Vec::new())).collect();
        Self {
            segments_by_date,
            dates,
        }
    }

    pub(crate) fn push(&mut self, date: NaiveDate, segment: StreetSegment) {
        self.segments_by_date
            .entry(date_key(date))
            .or_default()
            .push(segment);
    }

    pub fn segments_on(&self, date_key: &str) -> Option<&[StreetSegment]> {
        self.segments_by_date.get(date_key).map(Vec::as_slice)
    }

    pub fn segment_count(&self) -> usize {
        self.segments_by_date.values().map(Vec::len).sum()
    }
}
