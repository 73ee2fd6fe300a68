use pyo3::prelude::*;
use pyo3_stub_gen::define_stub_info_gatherer;

use calendar::{segments_geojson, sweeping_calendar};
use geometry::{bearing, classify_side};
use model::{PySweepingSchedule, py_load_schedule};

pub mod calendar;
pub mod geometry;
pub mod model;

/// A Python module implemented in Rust.
#[pymodule]
fn sweepmap(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    m.add_class::<PySweepingSchedule>()?;
    m.add_function(wrap_pyfunction!(py_load_schedule, m)?)?;

    m.add_function(wrap_pyfunction!(sweeping_calendar, m)?)?;
    m.add_function(wrap_pyfunction!(segments_geojson, m)?)?;

    m.add_function(wrap_pyfunction!(bearing, m)?)?;
    m.add_function(wrap_pyfunction!(classify_side, m)?)?;
    Ok(())
}

define_stub_info_gatherer!(stub_info);
