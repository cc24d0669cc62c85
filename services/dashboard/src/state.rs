use std::sync::Arc;

use docstore::DocumentStore;

pub type SharedState = Arc<AppState>;

/// Created once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub excluded_collections: Vec<String>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, excluded_collections: Vec<String>) -> Self {
        Self { store, excluded_collections }
    }

    pub fn is_excluded(&self, collection: &str) -> bool {
        self.excluded_collections.iter().any(|c| c == collection)
    }
}
