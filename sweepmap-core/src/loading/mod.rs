//! This module is responsible for loading the sweeping schedule dataset
//! (CSV rows with WKT centerlines) into schedule records.

mod builder;
mod config;
mod parser;
mod raw_types;

pub use builder::{LoadReport, ScheduleDataset, load_schedule, records_from_reader};
pub use config::{DiscRegionConfig, RenderModeKind, ScheduleConfig, parse_time_zone};
pub use parser::parse_line_geometry;
pub use raw_types::FeedRow;
