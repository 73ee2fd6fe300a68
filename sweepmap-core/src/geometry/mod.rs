//! Geometry engine: bearings, block side classification and the synthetic
//! offset lines / corridor polygons used to draw which side of a street is swept.
//!
//! All lines are `geo::LineString<f64>` with x = longitude and y = latitude.

mod bearing;
mod offset;
mod side;

pub use bearing::{bearing, from_lat_lng, line_bearing, to_lat_lng};
pub use offset::{build_corridor_polygons, offset_line};
pub use side::{CleanedSide, classify_side, cleaned_side};
