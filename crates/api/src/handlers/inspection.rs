//! Handlers for the `/inspections` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use thermoscan_core::error::CoreError;
use thermoscan_core::types::DbId;
use thermoscan_db::models::inspection::{CreateInspection, Inspection};
use thermoscan_db::models::inspection_image::InspectionImage;
use thermoscan_db::repositories::{InspectionImageRepo, InspectionRepo, TransformerRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_inspection_exists;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/inspections
///
/// The transformer must already be registered.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateInspection>,
) -> AppResult<(StatusCode, Json<DataResponse<Inspection>>)> {
    input.validate()?;

    if TransformerRepo::find_by_no(&state.pool, &input.transformer_no)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFoundByKey {
            entity: "Transformer",
            key: input.transformer_no,
        }));
    }

    let inspection = InspectionRepo::create(&state.pool, &input).await?;
    tracing::info!(
        inspection_id = inspection.id,
        transformer_no = %inspection.transformer_no,
        "Inspection created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: inspection })))
}

/// GET /api/inspections
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Inspection>>>> {
    let inspections = InspectionRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: inspections }))
}

/// GET /api/inspections/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Inspection>>> {
    let inspection = ensure_inspection_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: inspection }))
}

/// GET /api/inspections/{id}/images
pub async fn list_images(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<InspectionImage>>>> {
    ensure_inspection_exists(&state.pool, id).await?;
    let images = InspectionImageRepo::list_by_inspection(&state.pool, id).await?;
    Ok(Json(DataResponse { data: images }))
}
