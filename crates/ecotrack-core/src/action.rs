use crate::error::{Result, TrackerError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single tracked sustainability activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: u64,
    pub action: String,
    pub date: NaiveDate,
    pub points: i64,
}

/// Fields of a fully validated create/replace payload. Carries no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDraft {
    pub action: String,
    pub date: NaiveDate,
    pub points: i64,
}

/// Fields of a validated partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionPatch {
    pub action: Option<String>,
    pub date: Option<NaiveDate>,
    pub points: Option<i64>,
}

impl ActionDraft {
    pub fn into_action(self, id: u64) -> Action {
        Action {
            id,
            action: self.action,
            date: self.date,
            points: self.points,
        }
    }
}

impl ActionPatch {
    pub fn is_empty(&self) -> bool {
        self.action.is_none() && self.date.is_none() && self.points.is_none()
    }

    /// Shallow key-wise merge onto `target`; the id is never touched.
    pub fn apply(self, target: &mut Action) {
        if let Some(action) = self.action {
            target.action = action;
        }
        if let Some(date) = self.date {
            target.date = date;
        }
        if let Some(points) = self.points {
            target.points = points;
        }
    }
}

// ---------------------------------------------------------------------------
// Collection operations (operate on a mutable Vec<Action>)
// ---------------------------------------------------------------------------

/// `max(existing ids) + 1`, or 1 for an empty collection. Fails once the
/// largest id is `u64::MAX`.
pub fn next_id(actions: &[Action]) -> Result<u64> {
    let max = actions.iter().map(|a| a.id).max().unwrap_or(0);
    max.checked_add(1).ok_or(TrackerError::IdsExhausted(max))
}

/// Append a new record and return a copy of it with its assigned id.
pub fn insert(actions: &mut Vec<Action>, draft: ActionDraft) -> Result<Action> {
    let created = draft.into_action(next_id(actions)?);
    actions.push(created.clone());
    Ok(created)
}

pub fn find(actions: &[Action], id: u64) -> Result<&Action> {
    actions
        .iter()
        .find(|a| a.id == id)
        .ok_or(TrackerError::ActionNotFound(id))
}

/// Overwrite the record in place, keeping its position and id.
pub fn replace(actions: &mut [Action], id: u64, draft: ActionDraft) -> Result<Action> {
    let slot = find_mut(actions, id)?;
    *slot = draft.into_action(id);
    Ok(slot.clone())
}

pub fn merge(actions: &mut [Action], id: u64, patch: ActionPatch) -> Result<Action> {
    let slot = find_mut(actions, id)?;
    patch.apply(slot);
    Ok(slot.clone())
}

pub fn remove(actions: &mut Vec<Action>, id: u64) -> Result<Action> {
    let pos = actions
        .iter()
        .position(|a| a.id == id)
        .ok_or(TrackerError::ActionNotFound(id))?;
    Ok(actions.remove(pos))
}

fn find_mut(actions: &mut [Action], id: u64) -> Result<&mut Action> {
    actions
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or(TrackerError::ActionNotFound(id))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
