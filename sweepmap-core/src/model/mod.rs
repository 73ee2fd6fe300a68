//! Data model for sweeping schedules
//!
//! Contains the schedule rules as loaded from the source dataset, the region
//! descriptors used for spatial filtering and the render-ready segments.

pub mod block_side;
pub mod record;
pub mod region;
pub mod segment;

pub use block_side::BlockSide;
pub use record::{ScheduleRecord, WeekFlags, parse_weekday_label, weekday_label};
pub use region::BoundingBox;
pub use segment::{CorridorPolygons, StreetSegment, format_hour, time_display};
