use std::fs::File;
use std::io::Read;

use chrono::{DateTime, NaiveDate, Utc};
use log::{info, trace, warn};

use super::config::ScheduleConfig;
use super::parser::parse_line_geometry;
use super::raw_types::FeedRow;
use crate::algo::aggregate::ScheduleAggregator;
use crate::algo::filter::{RectangleFilter, SpatialFilter};
use crate::calendar::{DateHorizon, SweepingCalendar, default_date};
use crate::model::parse_weekday_label;
use crate::{BlockSide, BoundingBox, Error, Hour, ScheduleRecord, WeekFlags};

/// Counts of rows read and skipped while loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub undecodable: usize,
    pub missing_id: usize,
    pub invalid_geometry: usize,
    pub invalid_hours: usize,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.undecodable + self.missing_id + self.invalid_geometry + self.invalid_hours
    }
}

enum SkipReason {
    MissingId,
    InvalidGeometry(Error),
    InvalidHours,
}

/// Loaded schedule, immutable after construction
#[derive(Debug, Clone)]
pub struct ScheduleDataset {
    records: Vec<ScheduleRecord>,
    config: ScheduleConfig,
    report: LoadReport,
}

impl ScheduleDataset {
    pub fn from_records(records: Vec<ScheduleRecord>, config: ScheduleConfig) -> Self {
        let report = LoadReport {
            loaded: records.len(),
            ..LoadReport::default()
        };
        Self {
            records,
            config,
            report,
        }
    }

    pub fn records(&self) -> &[ScheduleRecord] {
        &self.records
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn report(&self) -> LoadReport {
        self.report
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Configured number of days, starting with the local date of `reference`.
    pub fn horizon(&self, reference: DateTime<Utc>) -> DateHorizon {
        DateHorizon::starting_at(reference, self.config.time_zone, self.config.horizon_days)
    }

    pub fn default_date(&self, reference: DateTime<Utc>) -> NaiveDate {
        default_date(
            reference,
            self.config.time_zone,
            self.config.default_date_cutoff_hour,
        )
    }

    /// Calendar over the configured horizon and render mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured render mode is invalid.
    pub fn calendar<F>(&self, reference: DateTime<Utc>, filter: &F) -> Result<SweepingCalendar, Error>
    where
        F: SpatialFilter + ?Sized,
    {
        let aggregator = ScheduleAggregator::new(self.config.render_mode())?;
        aggregator.aggregate(&self.records, &self.horizon(reference), filter)
    }

    /// Calendar restricted to the configured default region.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured region or render mode is invalid.
    pub fn calendar_for_default_region(
        &self,
        reference: DateTime<Utc>,
    ) -> Result<SweepingCalendar, Error> {
        let region = self.config.default_region()?;
        self.calendar(reference, &region)
    }

    /// Single-date calendar within the configured default region, `None` if
    /// `date` lies outside the horizon starting at `reference`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured region or render mode is invalid.
    pub fn calendar_for_date(
        &self,
        reference: DateTime<Utc>,
        date: NaiveDate,
    ) -> Result<Option<SweepingCalendar>, Error> {
        if !self.horizon(reference).contains(date) {
            return Ok(None);
        }
        let region = self.config.default_region()?;
        let aggregator = ScheduleAggregator::new(self.config.render_mode())?;
        aggregator
            .aggregate(&self.records, &DateHorizon::from_dates(vec![date]), &region)
            .map(Some)
    }

    /// Calendar restricted to a viewport, grown by the configured buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured buffer or render mode is invalid.
    pub fn calendar_for_bounds(
        &self,
        reference: DateTime<Utc>,
        bounds: BoundingBox,
    ) -> Result<SweepingCalendar, Error> {
        let filter = RectangleFilter::new(bounds, self.config.bbox_buffer_degrees)?;
        self.calendar(reference, &filter)
    }
}

/// Loads the schedule CSV named by the configuration
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the file cannot be read.
/// Individual bad rows are skipped, not reported as errors.
pub fn load_schedule(config: &ScheduleConfig) -> Result<ScheduleDataset, Error> {
    config.validate()?;

    if !config.csv_path.exists() {
        return Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Schedule file not found: {}", config.csv_path.display()),
        )));
    }

    info!("Loading sweeping schedule: {}", config.csv_path.display());
    let file = File::open(&config.csv_path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!(
                "Failed to open file '{}': {}",
                config.csv_path.display(),
                e
            ),
        )
    })?;
    let (records, report) = records_from_reader(file)?;

    Ok(ScheduleDataset {
        records,
        config: config.clone(),
        report,
    })
}

/// Reads schedule records from CSV data with a header row.
///
/// Rows that cannot be decoded, lack an identifier, or carry missing or
/// malformed geometry or hours are skipped and counted in the report.
///
/// # Errors
///
/// Returns an error only if the header row cannot be read.
pub fn records_from_reader<R: Read>(reader: R) -> Result<(Vec<ScheduleRecord>, LoadReport), Error> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader.headers()?;

    let mut report = LoadReport::default();
    let mut records = Vec::new();

    for (row_idx, row) in csv_reader.deserialize::<FeedRow>().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                trace!("Row {row_idx} could not be decoded: {e}");
                report.undecodable += 1;
                continue;
            }
        };

        match record_from_row(row) {
            Ok(record) => records.push(record),
            Err(SkipReason::MissingId) => {
                trace!("Row {row_idx} has no CNN - skipping");
                report.missing_id += 1;
            }
            Err(SkipReason::InvalidGeometry(e)) => {
                trace!("Row {row_idx} has no usable geometry: {e}");
                report.invalid_geometry += 1;
            }
            Err(SkipReason::InvalidHours) => {
                trace!("Row {row_idx} has invalid sweeping hours - skipping");
                report.invalid_hours += 1;
            }
        }
    }

    report.loaded = records.len();
    info!("Loaded {} schedule records", report.loaded);
    if report.skipped() > 0 {
        warn!(
            "Skipped {} schedule rows ({} undecodable, {} without CNN, {} without valid geometry, {} with invalid hours)",
            report.skipped(),
            report.undecodable,
            report.missing_id,
            report.invalid_geometry,
            report.invalid_hours
        );
    }

    Ok((records, report))
}

fn record_from_row(row: FeedRow) -> Result<ScheduleRecord, SkipReason> {
    let cnn = row.cnn.trim();
    if cnn.is_empty() {
        return Err(SkipReason::MissingId);
    }
    let geometry = parse_line_geometry(&row.line).map_err(SkipReason::InvalidGeometry)?;
    let from_hour = parse_hour(&row.from_hour).ok_or(SkipReason::InvalidHours)?;
    let to_hour = parse_hour(&row.to_hour).ok_or(SkipReason::InvalidHours)?;

    Ok(ScheduleRecord {
        cnn: cnn.to_string(),
        week_flags: WeekFlags(row.week_flags()),
        holiday: row.holiday(),
        block_side: BlockSide::from_label(&row.block_side),
        weekday: parse_weekday_label(&row.week_day),
        corridor: row.corridor,
        limits: row.limits,
        side_label: row.block_side,
        weekday_label: row.week_day,
        from_hour,
        to_hour,
        geometry,
    })
}

fn parse_hour(text: &str) -> Option<Hour> {
    text.trim().parse::<Hour>().ok().filter(|hour| *hour <= 23)
}
