use ecotrack_core::store::{ActionStore, JsonFileStore};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ActionStore>,
    /// Held across load → mutate → save so concurrent writers in this
    /// process cannot overwrite each other's changes.
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(store: Arc<dyn ActionStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// State backed by the JSON file at `data_file`.
    pub fn with_data_file(data_file: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(JsonFileStore::new(data_file)))
    }
}
