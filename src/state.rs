use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::AppConfig;
use crate::services::workflow::BookingWorkflow;

pub struct AppState {
    pub config: AppConfig,
    pub workflow: Mutex<BookingWorkflow>,
}

impl AppState {
    pub fn new(config: AppConfig, workflow: BookingWorkflow) -> Self {
        Self {
            config,
            workflow: Mutex::new(workflow),
        }
    }

    /// Locks the workflow for one whole request, so slot lookup and
    /// reservation happen as a single step.
    pub fn workflow(&self) -> MutexGuard<'_, BookingWorkflow> {
        self.workflow.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
