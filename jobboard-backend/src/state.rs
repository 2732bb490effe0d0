use std::sync::Arc;

use jobboard_db::DocumentStore;

use crate::service::{FallbackPolicy, JobService};

/// Shared application state passed to every route handler.
pub struct AppState {
    pub jobs: JobService,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, policy: FallbackPolicy) -> Self {
        Self {
            jobs: JobService::new(store, policy),
        }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        self.jobs.store()
    }
}
