use chrono::NaiveDateTime;
use pyo3::prelude::*;
use pyo3_stub_gen::derive::gen_stub_pyfunction;
use sweepmap_core::calendar::segments_to_geojson;
use sweepmap_core::prelude::*;

use crate::model::{PySweepingSchedule, reference_instant};

fn calendar_for(
    schedule: &PySweepingSchedule,
    reference: Option<NaiveDateTime>,
    bounds: Option<(f64, f64, f64, f64)>,
) -> PyResult<SweepingCalendar> {
    let reference = reference_instant(reference);
    let dataset = &schedule.dataset;
    let calendar = match bounds {
        Some((north, south, east, west)) => {
            dataset.calendar_for_bounds(reference, BoundingBox::new(north, south, east, west))
        }
        None => dataset.calendar_for_default_region(reference),
    };
    calendar.map_err(|e| {
        PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
            "Failed to build sweeping calendar: {e}"
        ))
    })
}

/// Street segments swept on each date of the schedule's horizon
///
/// Parameters
/// ----------
/// schedule : SweepingSchedule
/// reference : datetime.datetime, optional
///     Naive UTC instant treated as "now" (default: the current time)
/// bounds : tuple[float, float, float, float], optional
///     (north, south, east, west) viewport; if None the schedule's
///     configured region is used
///
/// Returns
/// -------
/// str
///     JSON object ``{"segmentsByDate": {...}, "dates": [...]}``
#[gen_stub_pyfunction]
#[pyfunction]
#[pyo3(signature = (schedule, reference = None, bounds = None))]
pub fn sweeping_calendar(
    py: Python<'_>,
    schedule: &PySweepingSchedule,
    reference: Option<NaiveDateTime>,
    bounds: Option<(f64, f64, f64, f64)>,
) -> PyResult<String> {
    py.detach(|| {
        let calendar = calendar_for(schedule, reference, bounds)?;
        serde_json::to_string(&calendar).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                "Failed to serialize calendar: {e}"
            ))
        })
    })
}

/// Segments swept on one date as a GeoJSON FeatureCollection string
///
/// Raises
/// ------
/// ValueError
///     If ``date`` is not a ``YYYY-MM-DD`` key within the horizon
#[gen_stub_pyfunction]
#[pyfunction]
#[pyo3(signature = (schedule, date, reference = None, bounds = None))]
pub fn segments_geojson(
    py: Python<'_>,
    schedule: &PySweepingSchedule,
    date: &str,
    reference: Option<NaiveDateTime>,
    bounds: Option<(f64, f64, f64, f64)>,
) -> PyResult<String> {
    py.detach(|| {
        let calendar = calendar_for(schedule, reference, bounds)?;
        let segments = calendar.segments_on(date).ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Date '{date}' is not within the schedule horizon"
            ))
        })?;
        let collection = segments_to_geojson(segments).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                "Failed to export GeoJSON: {e}"
            ))
        })?;
        serde_json::to_string(&collection).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                "Failed to serialize GeoJSON: {e}"
            ))
        })
    })
}
