use geo::Point;
use pyo3::prelude::*;
use pyo3_stub_gen::derive::gen_stub_pyfunction;
use sweepmap_core::BlockSide;

/// Initial great-circle bearing between two points, degrees in [0, 360)
#[gen_stub_pyfunction]
#[pyfunction]
pub fn bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    sweepmap_core::geometry::bearing(Point::new(lon1, lat1), Point::new(lon2, lat2))
}

/// Side of a line a block side label refers to: 1 right, -1 left, 0 none
#[gen_stub_pyfunction]
#[pyfunction]
pub fn classify_side(bearing: f64, label: &str) -> i8 {
    sweepmap_core::geometry::classify_side(bearing, BlockSide::from_label(label))
}
