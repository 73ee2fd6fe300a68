use std::path::PathBuf;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::algo::aggregate::RenderMode;
use crate::algo::filter::{DiscFilter, RegionFilter};
use crate::{DEFAULT_BBOX_BUFFER_DEGREES, DEFAULT_CORRIDOR_HALF_WIDTH_METERS, Error, LatLng};

/// Settings for loading a schedule and rendering its calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleConfig {
    /// Street sweeping schedule CSV
    pub csv_path: PathBuf,
    /// Zone in which calendar days are counted
    pub time_zone: Tz,
    /// Number of days evaluated, starting today
    pub horizon_days: u32,
    pub render_mode: RenderModeKind,
    /// Distance the centerline is moved towards the swept side in `offset` mode
    pub offset_meters: f64,
    pub corridor_half_width_meters: f64,
    /// Buffer around viewport rectangles, in degrees
    pub bbox_buffer_degrees: f64,
    /// Local hour from which the default date becomes tomorrow
    pub default_date_cutoff_hour: u32,
    /// Area served when no viewport is given; `None` serves everything
    pub disc: Option<DiscRegionConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderModeKind {
    Raw,
    Offset,
    #[default]
    Corridor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscRegionConfig {
    pub center_lat: f64,
    pub center_lon: f64,
    pub radius_miles: f64,
}

impl Default for DiscRegionConfig {
    fn default() -> Self {
        // Western Addition, San Francisco
        Self {
            center_lat: 37.787916,
            center_lon: -122.446413,
            radius_miles: 2.0,
        }
    }
}

impl DiscRegionConfig {
    /// The default disc with the given center and/or radius swapped in.
    pub fn with_overrides(center: Option<LatLng>, radius_miles: Option<f64>) -> Self {
        let defaults = Self::default();
        let (center_lat, center_lon) = center.unwrap_or((defaults.center_lat, defaults.center_lon));
        Self {
            center_lat,
            center_lon,
            radius_miles: radius_miles.unwrap_or(defaults.radius_miles),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("Street_Sweeping_Schedule.csv"),
            time_zone: chrono_tz::America::Los_Angeles,
            horizon_days: 30,
            render_mode: RenderModeKind::default(),
            offset_meters: 0.0,
            corridor_half_width_meters: DEFAULT_CORRIDOR_HALF_WIDTH_METERS,
            bbox_buffer_degrees: DEFAULT_BBOX_BUFFER_DEGREES,
            default_date_cutoff_hour: 13,
            disc: Some(DiscRegionConfig::default()),
        }
    }
}

/// Parses an IANA zone name such as `America/Los_Angeles`.
///
/// # Errors
///
/// Returns `Error::InvalidTimeZone` for names missing from the tz database.
pub fn parse_time_zone(name: &str) -> Result<Tz, Error> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| Error::InvalidTimeZone(format!("'{name}': {e}")))
}

impl ScheduleConfig {
    pub fn with_csv_path(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            ..Self::default()
        }
    }

    pub fn render_mode(&self) -> RenderMode {
        match self.render_mode {
            RenderModeKind::Raw => RenderMode::Centerline,
            RenderModeKind::Offset => RenderMode::Offset {
                meters: self.offset_meters,
            },
            RenderModeKind::Corridor => RenderMode::Corridor {
                half_width_meters: self.corridor_half_width_meters,
            },
        }
    }

    /// Filter for requests that do not carry their own viewport.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured radius is negative.
    pub fn default_region(&self) -> Result<RegionFilter, Error> {
        match self.disc {
            Some(disc) => Ok(RegionFilter::Disc(DiscFilter::from_miles(
                disc.center_lat,
                disc.center_lon,
                disc.radius_miles,
            )?)),
            None => Ok(RegionFilter::Everywhere),
        }
    }

    /// Checks value ranges. File existence is checked by the loader.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidData` describing the first invalid setting.
    pub fn validate(&self) -> Result<(), Error> {
        if self.horizon_days == 0 {
            return Err(Error::InvalidData(
                "horizon_days must be at least 1".to_string(),
            ));
        }
        if !self.offset_meters.is_finite() || self.offset_meters < 0.0 {
            return Err(Error::InvalidData(format!(
                "offset_meters must be a non-negative finite number, got {}",
                self.offset_meters
            )));
        }
        if self.corridor_half_width_meters.is_nan() || self.corridor_half_width_meters < 0.0 {
            return Err(Error::InvalidData(format!(
                "corridor_half_width_meters must not be negative, got {}",
                self.corridor_half_width_meters
            )));
        }
        if self.bbox_buffer_degrees.is_nan() || self.bbox_buffer_degrees < 0.0 {
            return Err(Error::InvalidData(format!(
                "bbox_buffer_degrees must not be negative, got {}",
                self.bbox_buffer_degrees
            )));
        }
        if self.default_date_cutoff_hour > 23 {
            return Err(Error::InvalidData(format!(
                "default_date_cutoff_hour must be within 0-23, got {}",
                self.default_date_cutoff_hour
            )));
        }
        if let Some(disc) = self.disc
            && (disc.radius_miles.is_nan() || disc.radius_miles < 0.0)
        {
            return Err(Error::InvalidData(format!(
                "disc radius_miles must not be negative, got {}",
                disc.radius_miles
            )));
        }
        Ok(())
    }
}
