use chrono::{DateTime, NaiveDateTime, Utc};
use pyo3::prelude::*;
use pyo3_stub_gen::derive::{gen_stub_pyclass, gen_stub_pyfunction, gen_stub_pymethods};
use sweepmap_core::calendar::date_key;
use sweepmap_core::loading::{DiscRegionConfig, RenderModeKind, parse_time_zone};
use sweepmap_core::prelude::*;

/// SweepingSchedule
///
/// A street sweeping schedule loaded from the city's schedule CSV. Each
/// record couples a street centerline with a recurring weekday and
/// week-of-month rule.
///
/// Rows without an identifier, with malformed geometry or invalid hours
/// are skipped while loading; ``skipped_rows`` reports how many.
///
/// Example:
///
/// .. code-block:: python
///
///     schedule = load_schedule("Street_Sweeping_Schedule.csv")
///     schedule.available_dates()
#[gen_stub_pyclass]
#[pyclass(name = "SweepingSchedule")]
pub struct PySweepingSchedule {
    pub(crate) dataset: ScheduleDataset,
}

#[gen_stub_pymethods]
#[pymethods]
impl PySweepingSchedule {
    pub fn record_count(&self) -> usize {
        self.dataset.len()
    }

    pub fn skipped_rows(&self) -> usize {
        self.dataset.report().skipped()
    }

    /// Date keys (``YYYY-MM-DD``) of the horizon starting at ``reference``,
    /// a naive UTC ``datetime`` (default: now).
    #[pyo3(signature = (reference = None))]
    pub fn available_dates(&self, reference: Option<NaiveDateTime>) -> Vec<String> {
        self.dataset.horizon(reference_instant(reference)).keys()
    }

    /// Today before the cutoff hour, tomorrow afterwards.
    #[pyo3(signature = (reference = None))]
    pub fn default_date(&self, reference: Option<NaiveDateTime>) -> String {
        date_key(self.dataset.default_date(reference_instant(reference)))
    }

    fn __repr__(&self) -> String {
        let config = self.dataset.config();
        format!(
            "SweepingSchedule with {} records ({} days in {})",
            self.dataset.len(),
            config.horizon_days,
            config.time_zone
        )
    }

    fn __str__(&self) -> String {
        self.__repr__()
    }
}

pub(crate) fn reference_instant(reference: Option<NaiveDateTime>) -> DateTime<Utc> {
    reference.map_or_else(Utc::now, |naive| naive.and_utc())
}

fn parse_render_mode(render_mode: &str) -> PyResult<RenderModeKind> {
    match render_mode {
        "raw" => Ok(RenderModeKind::Raw),
        "offset" => Ok(RenderModeKind::Offset),
        "corridor" => Ok(RenderModeKind::Corridor),
        other => Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
            "Unknown render mode '{other}', expected 'raw', 'offset' or 'corridor'"
        ))),
    }
}

/// Load a street sweeping schedule
///
/// Parameters
/// ----------
/// csv_path : str
///     Path to the schedule CSV (``CNN``, ``BlockSide``, ``WeekDay``,
///     ``Week1`` .. ``Week5``, ``Line`` ... columns)
/// time_zone : str, default="America/Los_Angeles"
///     IANA zone in which calendar days are counted
/// horizon_days : int, default=30
///     Number of days evaluated, starting today
/// render_mode : str, default="corridor"
///     ``raw`` centerlines, ``offset`` lines or split ``corridor`` polygons
/// offset_meters : float, default=0.0
///     Shift towards the swept side in ``offset`` mode
/// corridor_half_width_meters : float, default=8.0
///     Width of each corridor half in ``corridor`` mode
/// center : tuple[float, float], optional
///     (lat, lon) center of the area served when no bounds are given,
///     defaults to the Western Addition
/// radius_miles : float, optional
///     Radius of that area, defaults to 2 miles. ``float("inf")`` serves
///     every street.
///
/// Either argument may be given alone; the other keeps its default.
///
/// Returns
/// -------
/// SweepingSchedule
///
/// Raises
/// ------
/// ValueError
///     If a parameter is invalid
/// RuntimeError
///     If the file cannot be read
#[gen_stub_pyfunction]
#[pyfunction(name = "load_schedule")]
#[pyo3(signature = (
    csv_path,
    time_zone = "America/Los_Angeles",
    horizon_days = 30,
    render_mode = "corridor",
    offset_meters = 0.0,
    corridor_half_width_meters = 8.0,
    center = None,
    radius_miles = None,
))]
#[allow(clippy::too_many_arguments)]
pub fn py_load_schedule(
    py: Python<'_>,
    csv_path: &str,
    time_zone: &str,
    horizon_days: u32,
    render_mode: &str,
    offset_meters: f64,
    corridor_half_width_meters: f64,
    center: Option<(f64, f64)>,
    radius_miles: Option<f64>,
) -> PyResult<PySweepingSchedule> {
    let time_zone = parse_time_zone(time_zone)
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;
    let disc = DiscRegionConfig::with_overrides(center, radius_miles);

    let config = ScheduleConfig {
        csv_path: csv_path.into(),
        time_zone,
        horizon_days,
        render_mode: parse_render_mode(render_mode)?,
        offset_meters,
        corridor_half_width_meters,
        disc: Some(disc),
        ..ScheduleConfig::default()
    };
    config
        .validate()
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;

    // Allow Python threads while reading the CSV
    py.detach(|| {
        let dataset = sweepmap_core::load_schedule(&config).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                "Failed to load schedule: {e}"
            ))
        })?;
        Ok(PySweepingSchedule { dataset })
    })
}
