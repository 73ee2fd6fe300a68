//! Street sweeping schedule engine.
//!
//! Turns a municipal sweeping schedule (street centerlines plus recurring
//! weekday/week-of-month rules) into per-date collections of renderable
//! street segments for a region of interest.

pub mod algo;
pub mod calendar;
mod error;
pub mod geometry;
pub mod loading;
pub mod model;
pub mod prelude;

pub use error::Error;

pub use algo::aggregate::{RenderMode, ScheduleAggregator};
pub use algo::filter::{DiscFilter, RectangleFilter, RegionFilter, SpatialFilter};
pub use calendar::{DateHorizon, SweepingCalendar};
pub use loading::{ScheduleConfig, ScheduleDataset, load_schedule};
pub use model::{BlockSide, BoundingBox, ScheduleRecord, StreetSegment, WeekFlags};

/// A `(latitude, longitude)` pair in decimal degrees, the order map clients expect.
pub type LatLng = (f64, f64);

/// Hour of day, 0-23.
pub type Hour = u8;

/// Default buffer added on every side of a viewport rectangle, in degrees (~500 m).
pub const DEFAULT_BBOX_BUFFER_DEGREES: f64 = 0.005;

/// Default half width of a rendered street corridor, in meters.
pub const DEFAULT_CORRIDOR_HALF_WIDTH_METERS: f64 = 8.0;

pub const KILOMETERS_PER_MILE: f64 = 1.60934;
