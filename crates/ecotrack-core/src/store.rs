use crate::action::Action;
use crate::error::{Result, TrackerError};
use crate::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// Whole-collection persistence. Every call is a full round trip: nothing
/// is cached between a `load` and the next one.
pub trait ActionStore: Send + Sync {
    /// Return the full collection in stored order.
    fn load(&self) -> Result<Vec<Action>>;

    /// Replace the stored collection with `actions`.
    fn save(&self, actions: &[Action]) -> Result<()>;
}

// ---------------------------------------------------------------------------
// JsonFileStore
// ---------------------------------------------------------------------------

/// A single pretty-printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ActionStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Action>> {
        let Some(bytes) = io::read_if_exists(&self.path)? else {
            return Ok(Vec::new());
        };
        if bytes.is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|source| TrackerError::StorageCorrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, actions: &[Action]) -> Result<()> {
        let mut data = serde_json::to_vec_pretty(actions)?;
        data.push(b'\n');
        io::atomic_write(&self.path, &data)?;
        tracing::debug!(path = %self.path.display(), count = actions.len(), "saved actions");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    actions: Mutex<Vec<Action>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ActionStore for MemoryStore {
    fn load(&self) -> Result<Vec<Action>> {
        let guard = self
            .actions
            .lock()
            .map_err(|_| TrackerError::StoreUnavailable("memory store lock poisoned".into()))?;
        Ok(guard.clone())
    }

    fn save(&self, actions: &[Action]) -> Result<()> {
        let mut guard = self
            .actions
            .lock()
            .map_err(|_| TrackerError::StoreUnavailable("memory store lock poisoned".into()))?;
        *guard = actions.to_vec();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
