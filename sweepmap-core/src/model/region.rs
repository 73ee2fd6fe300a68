use serde::{Deserialize, Serialize};

/// Rectangular region in decimal degrees, as sent by a map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Grows the box by `buffer` degrees on all four sides.
    pub fn expanded(&self, buffer: f64) -> Self {
        Self {
            north: self.north + buffer,
            south: self.south - buffer,
            east: self.east + buffer,
            west: self.west - buffer,
        }
    }

    /// Bounds inclusive.
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.south && lat <= self.north && lng >= self.west && lng <= self.east
    }
}
