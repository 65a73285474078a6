use crate::output::{print_actions, print_json};
use anyhow::{bail, Context};
use ecotrack_core::service;
use ecotrack_core::store::ActionStore;
use serde_json::{json, Map, Value};

pub fn list(store: &dyn ActionStore, json: bool) -> anyhow::Result<()> {
    let actions = service::list(store).context("failed to load actions")?;
    if json {
        print_json(&actions)?;
    } else if actions.is_empty() {
        println!("No actions recorded.");
    } else {
        print_actions(&actions);
    }
    Ok(())
}

pub fn show(store: &dyn ActionStore, id: u64, json: bool) -> anyhow::Result<()> {
    let action = service::get(store, id)?;
    if json {
        print_json(&action)?;
    } else {
        print_actions(std::slice::from_ref(&action));
    }
    Ok(())
}

pub fn add(
    store: &dyn ActionStore,
    action: &str,
    date: &str,
    points: i64,
    json: bool,
) -> anyhow::Result<()> {
    let payload = json!({ "action": action, "date": date, "points": points });
    let created = service::create(store, &payload)?;
    if json {
        print_json(&created)?;
    } else {
        println!(
            "Added action [{}]: {} on {} ({} points)",
            created.id, created.action, created.date, created.points
        );
    }
    Ok(())
}

pub fn update(
    store: &dyn ActionStore,
    id: u64,
    action: Option<&str>,
    date: Option<&str>,
    points: Option<i64>,
    json: bool,
) -> anyhow::Result<()> {
    let mut fields = Map::new();
    if let Some(a) = action {
        fields.insert("action".into(), Value::from(a));
    }
    if let Some(d) = date {
        fields.insert("date".into(), Value::from(d));
    }
    if let Some(p) = points {
        fields.insert("points".into(), Value::from(p));
    }
    if fields.is_empty() {
        bail!("nothing to update: pass --action, --date or --points");
    }

    let merged = service::update(store, id, &Value::Object(fields))?;
    if json {
        print_json(&merged)?;
    } else {
        println!(
            "Updated action [{}]: {} on {} ({} points)",
            merged.id, merged.action, merged.date, merged.points
        );
    }
    Ok(())
}

pub fn remove(store: &dyn ActionStore, id: u64, json: bool) -> anyhow::Result<()> {
    service::delete(store, id)?;
    if json {
        print_json(&json!({ "id": id, "deleted": true }))?;
    } else {
        println!("Removed action [{id}]");
    }
    Ok(())
}
