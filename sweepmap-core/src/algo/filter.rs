//! Spatial inclusion of street geometries in a region of interest.
//!
//! A line is included as soon as any one of its vertices satisfies the
//! region's point predicate. Segments are never clipped, so lines crossing
//! the region edge are always kept whole.

use geo::{Distance, Haversine, LineString, Point};

use crate::{BoundingBox, DEFAULT_BBOX_BUFFER_DEGREES, Error, KILOMETERS_PER_MILE};

pub trait SpatialFilter: Sync {
    fn includes(&self, geometry: &LineString<f64>) -> bool;
}

/// Vertices within `radius_km` of `center`, boundary inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscFilter {
    center: Point<f64>,
    radius_km: f64,
}

impl DiscFilter {
    /// # Errors
    ///
    /// Returns an error if the radius is negative or not a number.
    pub fn new(center_lat: f64, center_lon: f64, radius_km: f64) -> Result<Self, Error> {
        if radius_km.is_nan() || radius_km < 0.0 {
            return Err(Error::UnrecoverableError(
                "disc radius must be a non-negative number",
            ));
        }
        Ok(Self {
            center: Point::new(center_lon, center_lat),
            radius_km,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the radius is negative or not a number.
    pub fn from_miles(center_lat: f64, center_lon: f64, radius_miles: f64) -> Result<Self, Error> {
        Self::new(center_lat, center_lon, radius_miles * KILOMETERS_PER_MILE)
    }

    pub fn center(&self) -> Point<f64> {
        self.center
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    fn contains(&self, point: Point<f64>) -> bool {
        Haversine.distance(self.center, point) / 1000.0 <= self.radius_km
    }
}

impl SpatialFilter for DiscFilter {
    fn includes(&self, geometry: &LineString<f64>) -> bool {
        geometry.points().any(|point| self.contains(point))
    }
}

/// Vertices inside a viewport rectangle grown by a fixed buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleFilter {
    expanded: BoundingBox,
}

impl RectangleFilter {
    /// # Errors
    ///
    /// Returns an error if the buffer is negative or not a number.
    pub fn new(bounds: BoundingBox, buffer_degrees: f64) -> Result<Self, Error> {
        if buffer_degrees.is_nan() || buffer_degrees < 0.0 {
            return Err(Error::UnrecoverableError(
                "bounding box buffer must be a non-negative number",
            ));
        }
        Ok(Self {
            expanded: bounds.expanded(buffer_degrees),
        })
    }

    pub fn with_default_buffer(bounds: BoundingBox) -> Self {
        Self {
            expanded: bounds.expanded(DEFAULT_BBOX_BUFFER_DEGREES),
        }
    }

    pub fn expanded_bounds(&self) -> BoundingBox {
        self.expanded
    }
}

impl SpatialFilter for RectangleFilter {
    fn includes(&self, geometry: &LineString<f64>) -> bool {
        geometry
            .coords()
            .any(|coord| self.expanded.contains(coord.y, coord.x))
    }
}

/// Strategy selection over the available filters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegionFilter {
    Disc(DiscFilter),
    Rectangle(RectangleFilter),
    /// No spatial restriction
    Everywhere,
}

impl SpatialFilter for RegionFilter {
    fn includes(&self, geometry: &LineString<f64>) -> bool {
        match self {
            RegionFilter::Disc(disc) => disc.includes(geometry),
            RegionFilter::Rectangle(rectangle) => rectangle.includes(geometry),
            RegionFilter::Everywhere => true,
        }
    }
}

impl From<DiscFilter> for RegionFilter {
    fn from(filter: DiscFilter) -> Self {
        RegionFilter::Disc(filter)
    }
}

impl From<RectangleFilter> for RegionFilter {
    fn from(filter: RectangleFilter) -> Self {
        RegionFilter::Rectangle(filter)
    }
}
