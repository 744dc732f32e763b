use crate::models::Dataset;
use std::sync::Arc;

/// Shared read-only handle to the dataset, cloned into every handler.
///
/// The table never changes after startup, so there is no lock: concurrent
/// requests all read the same `Arc`ed data.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }
}
