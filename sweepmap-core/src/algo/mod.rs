//! Pure algorithms over the schedule model: recurrence matching, spatial
//! filtering and the aggregation pipeline combining both with the geometry engine.

pub mod aggregate;
pub mod filter;
pub mod recurrence;
