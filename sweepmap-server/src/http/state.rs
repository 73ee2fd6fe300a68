use std::sync::Arc;

use chrono::{DateTime, Utc};
use sweepmap_core::ScheduleDataset;

/// Source of the reference instant handed to the core
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(instant) => *instant,
        }
    }
}

/// Shared application state, cloned into every handler
#[derive(Debug, Clone)]
pub struct AppState {
    dataset: Arc<ScheduleDataset>,
    clock: Clock,
}

impl AppState {
    pub fn new(dataset: ScheduleDataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            clock: Clock::System,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn dataset(&self) -> Arc<ScheduleDataset> {
        Arc::clone(&self.dataset)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
