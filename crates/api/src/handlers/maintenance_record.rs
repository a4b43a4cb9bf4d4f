//! Handlers for the `/maintenance-records` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use thermoscan_core::error::CoreError;
use thermoscan_core::types::DbId;
use thermoscan_db::models::maintenance_record::{CreateMaintenanceRecord, MaintenanceRecord};
use thermoscan_db::repositories::MaintenanceRecordRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_inspection_exists;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/maintenance-records
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateMaintenanceRecord>,
) -> AppResult<(StatusCode, Json<DataResponse<MaintenanceRecord>>)> {
    ensure_inspection_exists(&state.pool, input.inspection_id).await?;

    let record = MaintenanceRecordRepo::create(&state.pool, &input).await?;
    tracing::info!(id = record.id, inspection_id = record.inspection_id, "MaintenanceRecord created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// GET /api/maintenance-records/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MaintenanceRecord>>> {
    let record = MaintenanceRecordRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MaintenanceRecord",
            id,
        }))?;
    Ok(Json(DataResponse { data: record }))
}

/// GET /api/maintenance-records/inspection/{inspection_id}
pub async fn get_by_inspection(
    State(state): State<AppState>,
    Path(inspection_id): Path<DbId>,
) -> AppResult<Json<DataResponse<MaintenanceRecord>>> {
    let record = MaintenanceRecordRepo::find_by_inspection(&state.pool, inspection_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "MaintenanceRecord",
                key: format!("inspectionId={inspection_id}"),
            })
        })?;
    Ok(Json(DataResponse { data: record }))
}
