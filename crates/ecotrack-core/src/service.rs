//! Request-level operations: each one loads the collection, applies a single
//! change and saves it back. Validation failures and missing ids return
//! before anything is written.

use crate::action::{self, Action};
use crate::error::{Result, TrackerError};
use crate::store::ActionStore;
use crate::validation;
use serde_json::Value;

pub fn list(store: &dyn ActionStore) -> Result<Vec<Action>> {
    store.load()
}

pub fn get(store: &dyn ActionStore, id: u64) -> Result<Action> {
    let actions = store.load()?;
    action::find(&actions, id).cloned()
}

pub fn create(store: &dyn ActionStore, payload: &Value) -> Result<Action> {
    let draft = validation::validate_draft(payload).map_err(TrackerError::Validation)?;
    let mut actions = store.load()?;
    let created = action::insert(&mut actions, draft)?;
    store.save(&actions)?;
    tracing::info!(id = created.id, action = %created.action, "created action");
    Ok(created)
}

/// Full replace. The id comes from the path, never from the payload.
pub fn replace(store: &dyn ActionStore, id: u64, payload: &Value) -> Result<Action> {
    let mut actions = store.load()?;
    action::find(&actions, id)?;
    let draft = validation::validate_draft(payload).map_err(TrackerError::Validation)?;
    let updated = action::replace(&mut actions, id, draft)?;
    store.save(&actions)?;
    tracing::info!(id, "replaced action");
    Ok(updated)
}

pub fn update(store: &dyn ActionStore, id: u64, payload: &Value) -> Result<Action> {
    let mut actions = store.load()?;
    action::find(&actions, id)?;
    let patch = validation::validate_patch(payload).map_err(TrackerError::Validation)?;
    if patch.is_empty() {
        return action::find(&actions, id).cloned();
    }
    let merged = action::merge(&mut actions, id, patch)?;
    store.save(&actions)?;
    tracing::info!(id, "updated action");
    Ok(merged)
}

pub fn delete(store: &dyn ActionStore, id: u64) -> Result<()> {
    let mut actions = store.load()?;
    action::remove(&mut actions, id)?;
    store.save(&actions)?;
    tracing::info!(id, "deleted action");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
