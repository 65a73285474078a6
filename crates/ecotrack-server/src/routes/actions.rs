use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ecotrack_core::action::Action;
use ecotrack_core::service;
use ecotrack_core::store::ActionStore;
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::state::AppState;

/// Ids that are not non-negative integers cannot match any record.
fn parse_id(raw: &str) -> Result<u64, AppError> {
    raw.parse::<u64>().map_err(|_| AppError::not_found())
}

/// An absent body reads as an empty object, so it reaches field validation.
fn body(bytes: &Bytes) -> Result<Value, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    Json::<Value>::from_bytes(bytes)
        .map(|Json(v)| v)
        .map_err(|rejection| AppError::bad_request(rejection.body_text()))
}

/// Run a read against the store on the blocking pool.
async fn read<T, F>(app: &AppState, op: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&dyn ActionStore) -> ecotrack_core::Result<T> + Send + 'static,
{
    let store = app.store.clone();
    let out = tokio::task::spawn_blocking(move || op(store.as_ref()))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
    Ok(out)
}

/// Run a load/mutate/save cycle under the write lock. The guard moves into
/// the blocking task, so it is held until the save finishes even if the
/// request future is dropped.
async fn write<T, F>(app: &AppState, op: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&dyn ActionStore) -> ecotrack_core::Result<T> + Send + 'static,
{
    let guard = app.write_lock.clone().lock_owned().await;
    let store = app.store.clone();
    let out = tokio::task::spawn_blocking(move || {
        let _guard = guard;
        op(store.as_ref())
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
    Ok(out)
}

/// GET /api/actions/ - list all actions in stored order.
pub async fn list_actions(State(app): State<AppState>) -> Result<Json<Vec<Action>>, AppError> {
    let actions = read(&app, service::list).await?;
    Ok(Json(actions))
}

/// POST /api/actions/ - validate and append a new action.
pub async fn create_action(
    State(app): State<AppState>,
    payload: Bytes,
) -> Result<(StatusCode, Json<Action>), AppError> {
    let payload = body(&payload)?;
    let created = write(&app, move |store| service::create(store, &payload)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/actions/:id/ - a single action.
pub async fn get_action(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Action>, AppError> {
    let id = parse_id(&id)?;
    let action = read(&app, move |store| service::get(store, id)).await?;
    Ok(Json(action))
}

/// PUT /api/actions/:id/ - replace every field, keeping the id.
pub async fn replace_action(
    State(app): State<AppState>,
    Path(id): Path<String>,
    payload: Bytes,
) -> Result<Json<Action>, AppError> {
    let id = parse_id(&id)?;
    let payload = body(&payload)?;
    let updated = write(&app, move |store| service::replace(store, id, &payload)).await?;
    Ok(Json(updated))
}

/// PATCH /api/actions/:id/ - merge the supplied fields.
pub async fn update_action(
    State(app): State<AppState>,
    Path(id): Path<String>,
    payload: Bytes,
) -> Result<Json<Action>, AppError> {
    let id = parse_id(&id)?;
    let payload = body(&payload)?;
    let merged = write(&app, move |store| service::update(store, id, &payload)).await?;
    Ok(Json(merged))
}

/// DELETE /api/actions/:id/ - remove the action.
pub async fn delete_action(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    write(&app, move |store| service::delete(store, id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
