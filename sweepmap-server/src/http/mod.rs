//! HTTP layer: query parsing and validation in front of the schedule core.

mod error;
mod handlers;
mod router;
mod state;

pub use router::create_router;
pub use state::{AppState, Clock};
