//! Aggregation of schedule records over a date horizon into per-date
//! collections of render-ready street segments.

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::filter::SpatialFilter;
use super::recurrence::matches_on_date;
use crate::calendar::{DateHorizon, SweepingCalendar};
use crate::geometry::{
    build_corridor_polygons, classify_side, cleaned_side, line_bearing, offset_line, to_lat_lng,
};
use crate::model::{CorridorPolygons, ScheduleRecord, StreetSegment};
use crate::{DEFAULT_CORRIDOR_HALF_WIDTH_METERS, Error};

/// How the geometry of a matched segment is drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RenderMode {
    /// The raw street centerline
    Centerline,
    /// The centerline shifted towards the swept side
    Offset { meters: f64 },
    /// Both corridor halves, with the swept half as the segment coordinates
    Corridor { half_width_meters: f64 },
}

impl Default for RenderMode {
    fn default() -> Self {
        RenderMode::Corridor {
            half_width_meters: DEFAULT_CORRIDOR_HALF_WIDTH_METERS,
        }
    }
}

impl RenderMode {
    fn validate(self) -> Result<Self, Error> {
        match self {
            RenderMode::Offset { meters } if !meters.is_finite() || meters < 0.0 => Err(
                Error::UnrecoverableError("offset distance must be a non-negative finite number"),
            ),
            RenderMode::Corridor { half_width_meters }
                if half_width_meters.is_nan() || half_width_meters < 0.0 =>
            {
                Err(Error::UnrecoverableError(
                    "corridor half width must be a non-negative number",
                ))
            }
            mode => Ok(mode),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScheduleAggregator {
    render_mode: RenderMode,
}

impl ScheduleAggregator {
    /// # Errors
    ///
    /// Returns an error if the render mode carries a negative or non-finite distance.
    pub fn new(render_mode: RenderMode) -> Result<Self, Error> {
        Ok(Self {
            render_mode: render_mode.validate()?,
        })
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// Matches every record against every date of the horizon.
    ///
    /// Records without an identifier or geometry are skipped, the spatial
    /// filter is applied once per record. Each date lists its segments in
    /// record order, and every horizon date is present in the result even
    /// when nothing is swept that day.
    ///
    /// # Errors
    ///
    /// Returns an error only if a segment geometry cannot be built.
    pub fn aggregate<F>(
        &self,
        records: &[ScheduleRecord],
        horizon: &DateHorizon,
        filter: &F,
    ) -> Result<SweepingCalendar, Error>
    where
        F: SpatialFilter + ?Sized,
    {
        let dates = horizon.dates();

        let mut matched = records
            .par_iter()
            .enumerate()
            .filter(|(_, record)| is_renderable(record) && filter.includes(&record.geometry))
            .filter_map(|(index, record)| {
                let matching_dates: Vec<usize> = dates
                    .iter()
                    .enumerate()
                    .filter(|(_, date)| matches_on_date(record, **date))
                    .map(|(date_idx, _)| date_idx)
                    .collect();
                (!matching_dates.is_empty()).then_some((index, record, matching_dates))
            })
            .map(|(index, record, matching_dates)| {
                self.build_segment(record)
                    .map(|segment| (index, matching_dates, segment))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        // merged results must keep the original record order
        matched.sort_by_key(|(index, _, _)| *index);
        debug!(
            "{} of {} records are swept within the horizon",
            matched.len(),
            records.len()
        );

        let mut calendar = SweepingCalendar::empty(horizon);
        let mut segment_count = 0;
        for (_, matching_dates, segment) in matched {
            for date_idx in matching_dates {
                calendar.push(dates[date_idx], segment.clone());
                segment_count += 1;
            }
        }

        info!(
            "Aggregated {segment_count} street segments over {} dates",
            dates.len()
        );
        Ok(calendar)
    }

    /// Builds the render-ready segment of one record.
    ///
    /// # Errors
    ///
    /// Returns an error if corridor polygons cannot be built.
    pub fn build_segment(&self, record: &ScheduleRecord) -> Result<StreetSegment, Error> {
        let geometry = &record.geometry;
        let segment = match self.render_mode {
            RenderMode::Centerline => StreetSegment::from_record(record, to_lat_lng(geometry), None),
            RenderMode::Offset { meters } => {
                let sign = line_bearing(geometry)
                    .map_or(0, |bearing| classify_side(bearing, record.block_side));
                let shifted = offset_line(geometry, meters * f64::from(sign));
                StreetSegment::from_record(record, to_lat_lng(&shifted), None)
            }
            RenderMode::Corridor { half_width_meters } => {
                let (left, right) = build_corridor_polygons(geometry, half_width_meters)?;
                let polygons = CorridorPolygons {
                    left_polygon: to_lat_lng(&left),
                    right_polygon: to_lat_lng(&right),
                    cleaned_side: cleaned_side(geometry, record.block_side),
                };
                let coordinates = polygons.cleaned_polygon().to_vec();
                StreetSegment::from_record(record, coordinates, Some(polygons))
            }
        };
        Ok(segment)
    }
}

fn is_renderable(record: &ScheduleRecord) -> bool {
    !record.cnn.trim().is_empty() && record.has_geometry()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::geometry::{CleanedSide, from_lat_lng};
    use crate::model::parse_weekday_label;
    use crate::{BlockSide, BoundingBox, RectangleFilter, RegionFilter, WeekFlags};

    fn record(cnn: &str, weekday: &str, side: &str, points: &[(f64, f64)]) -> ScheduleRecord {
        ScheduleRecord {
            cnn: cnn.into(),
            corridor: "Folsom St".into(),
            limits: "13th St  -  14th St".into(),
            side_label: side.into(),
            block_side: BlockSide::from_label(side),
            weekday_label: weekday.into(),
            weekday: parse_weekday_label(weekday),
            from_hour: 0,
            to_hour: 2,
            week_flags: WeekFlags::EVERY_WEEK,
            holiday: false,
            geometry: from_lat_lng(points),
        }
    }

    fn october_week() -> DateHorizon {
        // Monday 2025-10-06 .. Sunday 2025-10-12
        let start = NaiveDate::from_ymd_opt(2025, 10, 6).unwrap();
        DateHorizon::from_dates(start.iter_days().take(7).collect())
    }

    const NORTHBOUND: [(f64, f64); 2] = [(37.770, -122.41), (37.771, -122.41)];

    #[test]
    fn segments_are_grouped_by_date_in_record_order() {
        let records = vec![
            record("3", "Mon", "East", &NORTHBOUND),
            record("1", "Tues", "East", &NORTHBOUND),
            record("2", "Mon", "West", &NORTHBOUND),
        ];
        let aggregator = ScheduleAggregator::new(RenderMode::Centerline).unwrap();
        let calendar = aggregator
            .aggregate(&records, &october_week(), &RegionFilter::Everywhere)
            .unwrap();

        assert_eq!(calendar.dates.len(), 7);
        let monday: Vec<_> = calendar.segments_by_date["2025-10-06"]
            .iter()
            .map(|s| s.cnn.as_str())
            .collect();
        assert_eq!(monday, ["3", "2"]);
        assert_eq!(calendar.segments_by_date["2025-10-07"].len(), 1);
        assert!(calendar.segments_by_date["2025-10-08"].is_empty());
    }

    #[test]
    fn unusable_and_filtered_records_are_skipped() {
        let records = vec![
            record("", "Mon", "East", &NORTHBOUND),
            record("10", "Mon", "East", &[]),
            record("11", "Mon", "East", &[(38.5, -121.5), (38.6, -121.5)]),
            record("12", "Mon", "East", &NORTHBOUND),
        ];
        let viewport = RectangleFilter::with_default_buffer(BoundingBox::new(
            37.78, 37.76, -122.40, -122.42,
        ));
        let aggregator = ScheduleAggregator::new(RenderMode::Centerline).unwrap();
        let calendar = aggregator
            .aggregate(&records, &october_week(), &viewport)
            .unwrap();
        let monday = &calendar.segments_by_date["2025-10-06"];
        assert_eq!(monday.len(), 1);
        assert_eq!(monday[0].cnn, "12");
    }

    #[test]
    fn offset_mode_moves_towards_labelled_side() {
        let aggregator = ScheduleAggregator::new(RenderMode::Offset { meters: 5.0 }).unwrap();

        let east = aggregator
            .build_segment(&record("1", "Mon", "East", &NORTHBOUND))
            .unwrap();
        assert!(east.coordinates.iter().all(|(_, lng)| *lng > -122.41));

        let west = aggregator
            .build_segment(&record("1", "Mon", "West", &NORTHBOUND))
            .unwrap();
        assert!(west.coordinates.iter().all(|(_, lng)| *lng < -122.41));

        let unknown = aggregator
            .build_segment(&record("1", "Mon", "Median", &NORTHBOUND))
            .unwrap();
        assert_eq!(unknown.coordinates, NORTHBOUND.to_vec());
    }

    #[test]
    fn corridor_mode_highlights_swept_half() {
        let aggregator = ScheduleAggregator::new(RenderMode::default()).unwrap();
        let segment = aggregator
            .build_segment(&record("1", "Mon", "West", &NORTHBOUND))
            .unwrap();
        let polygons = segment.corridor_polygons.as_ref().unwrap();
        assert_eq!(polygons.cleaned_side, CleanedSide::Left);
        assert_eq!(segment.coordinates, polygons.left_polygon);
        assert_eq!(segment.coordinates.len(), 2 * NORTHBOUND.len());
        assert_eq!(polygons.right_polygon.len(), 2 * NORTHBOUND.len());
    }

    #[test]
    fn invalid_render_modes_are_rejected() {
        assert!(
            ScheduleAggregator::new(RenderMode::Corridor {
                half_width_meters: -2.0
            })
            .is_err()
        );
        assert!(ScheduleAggregator::new(RenderMode::Offset { meters: f64::NAN }).is_err());
        assert!(ScheduleAggregator::new(RenderMode::Offset { meters: 0.0 }).is_ok());
    }

    #[test]
    fn negative_offset_is_rejected_instead_of_flipping_sides() {
        // the sign comes from the block side, a negative distance would draw East as West
        assert!(matches!(
            ScheduleAggregator::new(RenderMode::Offset { meters: -5.0 }),
            Err(Error::UnrecoverableError(_))
        ));
    }

    #[test]
    fn render_mode_deserializes_from_tagged_table() {
        let mode: RenderMode =
            serde_json::from_str(r#"{"mode": "corridor", "half_width_meters": 6.0}"#).unwrap();
        assert_eq!(
            mode,
            RenderMode::Corridor {
                half_width_meters: 6.0
            }
        );
        let mode: RenderMode = serde_json::from_str(r#"{"mode": "centerline"}"#).unwrap();
        assert_eq!(mode, RenderMode::Centerline);
    }
}
