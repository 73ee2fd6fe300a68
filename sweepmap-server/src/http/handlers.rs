use axum::{
    Json,
    extract::{Path, Query, State},
};
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use sweepmap_core::calendar::{date_key, parse_date_key};
use sweepmap_core::{BoundingBox, StreetSegment, SweepingCalendar};

use super::error::AppError;
use super::state::AppState;

const INVALID_BOUNDS: &str = "Missing or invalid bounding box parameters";

pub async fn health() -> &'static str {
    "OK"
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatesResponse {
    pub dates: Vec<String>,
    pub default_date: String,
}

/// Dates of the horizon starting today.
pub async fn list_dates(State(state): State<AppState>) -> Json<DatesResponse> {
    let now = state.now();
    let dataset = state.dataset();
    Json(DatesResponse {
        dates: dataset.horizon(now).keys(),
        default_date: date_key(dataset.default_date(now)),
    })
}

/// Raw viewport parameters; parsed by hand so that every malformed value
/// produces the same client error.
#[derive(Debug, Default, Deserialize)]
pub struct BoundsQuery {
    pub north: Option<String>,
    pub south: Option<String>,
    pub east: Option<String>,
    pub west: Option<String>,
}

impl BoundsQuery {
    pub fn bounds(&self) -> Result<BoundingBox, AppError> {
        let parse = |value: &Option<String>| {
            value
                .as_deref()
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .ok_or_else(|| AppError::BadRequest(INVALID_BOUNDS.to_string()))
        };
        Ok(BoundingBox::new(
            parse(&self.north)?,
            parse(&self.south)?,
            parse(&self.east)?,
            parse(&self.west)?,
        ))
    }
}

/// Calendar of the streets near a map viewport.
pub async fn streets_in_bounds(
    State(state): State<AppState>,
    Query(query): Query<BoundsQuery>,
) -> Result<Json<SweepingCalendar>, AppError> {
    let bounds = query.bounds()?;
    let now = state.now();
    let dataset = state.dataset();

    let calendar =
        tokio::task::spawn_blocking(move || dataset.calendar_for_bounds(now, bounds)).await??;
    Ok(Json(calendar))
}

#[derive(Debug, Serialize)]
pub struct DateSegments {
    pub date: String,
    pub segments: Vec<StreetSegment>,
}

/// Segments swept on one date within the configured region.
pub async fn streets_on_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DateSegments>, AppError> {
    let calendar = default_region_calendar(&state, &date).await?;
    let segments = calendar
        .segments_by_date
        .get(&date)
        .cloned()
        .ok_or_else(|| not_in_horizon(&date))?;
    Ok(Json(DateSegments { date, segments }))
}

/// Same as [`streets_on_date`], as a `GeoJSON` feature collection.
pub async fn geojson_on_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<FeatureCollection>, AppError> {
    let calendar = default_region_calendar(&state, &date).await?;
    let collection = calendar
        .to_geojson(&date)?
        .ok_or_else(|| not_in_horizon(&date))?;
    Ok(Json(collection))
}

/// Calendar holding only `date`, aggregated within the configured region.
async fn default_region_calendar(state: &AppState, date: &str) -> Result<SweepingCalendar, AppError> {
    let parsed = parse_date_key(date).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let now = state.now();
    let dataset = state.dataset();

    tokio::task::spawn_blocking(move || dataset.calendar_for_date(now, parsed))
        .await??
        .ok_or_else(|| not_in_horizon(date))
}

fn not_in_horizon(date: &str) -> AppError {
    AppError::NotFound(format!("No sweeping data for {date}"))
}
