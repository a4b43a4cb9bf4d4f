//! Handlers for the `/work-datasheets` resource.
//!
//! Stored datasheets are also the source of `/pdf/generate/{id}` reports.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use thermoscan_core::error::CoreError;
use thermoscan_core::types::DbId;
use thermoscan_db::models::work_datasheet::{CreateWorkDatasheet, WorkDatasheet};
use thermoscan_db::repositories::WorkDatasheetRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_inspection_exists;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/work-datasheets
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateWorkDatasheet>,
) -> AppResult<(StatusCode, Json<DataResponse<WorkDatasheet>>)> {
    ensure_inspection_exists(&state.pool, input.inspection_id).await?;

    let record = WorkDatasheetRepo::create(&state.pool, &input).await?;
    tracing::info!(id = record.id, inspection_id = record.inspection_id, "WorkDatasheet created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// GET /api/work-datasheets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<WorkDatasheet>>> {
    let record = WorkDatasheetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WorkDatasheet",
            id,
        }))?;
    Ok(Json(DataResponse { data: record }))
}

/// GET /api/work-datasheets/inspection/{inspection_id}
pub async fn get_by_inspection(
    State(state): State<AppState>,
    Path(inspection_id): Path<DbId>,
) -> AppResult<Json<DataResponse<WorkDatasheet>>> {
    let record = WorkDatasheetRepo::find_by_inspection(&state.pool, inspection_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "WorkDatasheet",
                key: format!("inspectionId={inspection_id}"),
            })
        })?;
    Ok(Json(DataResponse { data: record }))
}
