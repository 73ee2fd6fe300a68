//! Router configuration for the HTTP API.

use std::time::Duration;

use axum::{
    BoxError, Json, Router,
    error_handling::HandleErrorLayer,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::config::ServerSettings;

/// Create the application router with all routes and middleware.
pub fn create_router(state: AppState, settings: &ServerSettings) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/dates", get(handlers::list_dates))
        .route("/streets", get(handlers::streets_in_bounds))
        .route("/streets/{date}", get(handlers::streets_on_date))
        .route("/streets/{date}/geojson", get(handlers::geojson_on_date));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(Duration::from_secs(settings.request_timeout_secs))
                .concurrency_limit(settings.max_concurrent_requests),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn handle_middleware_error(err: BoxError) -> impl IntoResponse {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timed out" })),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Unhandled internal error: {err}") })),
        )
    }
}
