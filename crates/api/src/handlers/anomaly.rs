//! Handlers for the `/anomalies` resource.
//!
//! Request bodies are parsed leniently by [`thermoscan_core::anomaly`]: the
//! annotation UI sends snake_case keys, camelCase keys and numeric strings
//! interchangeably.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use thermoscan_core::anomaly::{deleted_by, parse_insert_payload, parse_key};
use thermoscan_core::error::CoreError;
use thermoscan_core::types::DbId;
use thermoscan_db::models::anomaly::Anomaly;
use thermoscan_db::repositories::AnomalyRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/anomalies/insert
///
/// Body `{ "anomalies": [ ... ] }`; every item is inserted in one
/// transaction.
pub async fn insert(State(state): State<AppState>, Json(body): Json<Value>) -> AppResult<Json<Value>> {
    let drafts = parse_insert_payload(&body)?;
    let inserted = AnomalyRepo::insert_many(&state.pool, &drafts).await?;

    tracing::info!(count = inserted.len(), "Anomalies inserted");
    Ok(Json(json!({ "success": true, "inserted": inserted.len() })))
}

/// DELETE /api/anomalies/delete
///
/// Permanently removes every anomaly matching `(inspection_number, index)`.
pub async fn hard_delete(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<Value>> {
    let key = parse_key(&body)?;
    let deleted = AnomalyRepo::hard_delete_by_key(&state.pool, &key).await?;

    tracing::info!(
        inspection_number = %key.inspection_number,
        idx = key.idx,
        deleted,
        "Anomalies deleted",
    );
    Ok(Json(json!({ "success": true, "deleted": deleted })))
}

/// PATCH /api/anomalies/delete
///
/// Flags matching anomalies as deleted, recording `deletedBy` and the time.
pub async fn soft_delete(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<Value>> {
    let key = parse_key(&body)?;
    let by = deleted_by(&body);
    let updated = AnomalyRepo::soft_delete_by_key(&state.pool, &key, by.as_deref()).await?;

    tracing::info!(
        inspection_number = %key.inspection_number,
        idx = key.idx,
        deleted_by = ?by,
        updated,
        "Anomalies soft-deleted",
    );
    Ok(Json(json!({ "success": true, "updated": updated })))
}

/// GET /api/anomalies/{inspection_number}
pub async fn list_by_inspection(
    State(state): State<AppState>,
    Path(inspection_number): Path<String>,
) -> AppResult<Json<DataResponse<Vec<Anomaly>>>> {
    let anomalies = AnomalyRepo::list_by_inspection_number(&state.pool, &inspection_number).await?;
    Ok(Json(DataResponse { data: anomalies }))
}

/// GET /api/anomalies/by-id/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Anomaly>>> {
    let anomaly = AnomalyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Anomaly",
            id,
        }))?;
    Ok(Json(DataResponse { data: anomaly }))
}
