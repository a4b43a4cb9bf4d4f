//! Handlers for the `/general-records` resource (general inspection record).
//!
//! One per inspection; a second create for the same inspection is rejected
//! with 409 by the `uq_general_records_inspection_id` constraint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use thermoscan_core::error::CoreError;
use thermoscan_core::types::DbId;
use thermoscan_db::models::general_record::{CreateGeneralRecord, GeneralRecord};
use thermoscan_db::repositories::GeneralRecordRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_inspection_exists;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/general-records
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateGeneralRecord>,
) -> AppResult<(StatusCode, Json<DataResponse<GeneralRecord>>)> {
    ensure_inspection_exists(&state.pool, input.inspection_id).await?;

    let record = GeneralRecordRepo::create(&state.pool, &input).await?;
    tracing::info!(id = record.id, inspection_id = record.inspection_id, "GeneralRecord created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// GET /api/general-records/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GeneralRecord>>> {
    let record = GeneralRecordRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "GeneralRecord",
            id,
        }))?;
    Ok(Json(DataResponse { data: record }))
}

/// GET /api/general-records/inspection/{inspection_id}
pub async fn get_by_inspection(
    State(state): State<AppState>,
    Path(inspection_id): Path<DbId>,
) -> AppResult<Json<DataResponse<GeneralRecord>>> {
    let record = GeneralRecordRepo::find_by_inspection(&state.pool, inspection_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "GeneralRecord",
                key: format!("inspectionId={inspection_id}"),
            })
        })?;
    Ok(Json(DataResponse { data: record }))
}
