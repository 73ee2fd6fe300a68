// Re-export key components
pub use crate::algo::aggregate::{RenderMode, ScheduleAggregator};
pub use crate::algo::filter::{DiscFilter, RectangleFilter, RegionFilter, SpatialFilter};
pub use crate::algo::recurrence::{matches, matches_on_date};
pub use crate::calendar::{DateHorizon, SweepingCalendar, date_key, default_date, local_date};
pub use crate::geometry::{
    CleanedSide, bearing, build_corridor_polygons, classify_side, cleaned_side, offset_line,
};
pub use crate::loading::{
    ScheduleConfig, ScheduleDataset, load_schedule, parse_line_geometry, records_from_reader,
};
pub use crate::model::{
    BlockSide, BoundingBox, CorridorPolygons, ScheduleRecord, StreetSegment, WeekFlags,
};

// Core scalar types
pub use crate::Error;
pub use crate::Hour;
pub use crate::LatLng;
