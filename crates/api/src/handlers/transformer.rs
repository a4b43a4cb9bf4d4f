//! Handlers for the `/transformers` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use thermoscan_core::error::CoreError;
use thermoscan_db::models::inspection::Inspection;
use thermoscan_db::models::transformer::{CreateTransformer, Transformer};
use thermoscan_db::repositories::{InspectionRepo, TransformerRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/transformers
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTransformer>,
) -> AppResult<(StatusCode, Json<DataResponse<Transformer>>)> {
    input.validate()?;

    let transformer = TransformerRepo::create(&state.pool, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Transformer {} already exists",
                input.transformer_no
            )))
        })?;

    tracing::info!(transformer_no = %transformer.transformer_no, "Transformer registered");
    Ok((StatusCode::CREATED, Json(DataResponse { data: transformer })))
}

/// GET /api/transformers
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Transformer>>>> {
    let transformers = TransformerRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: transformers }))
}

/// GET /api/transformers/{transformer_no}
pub async fn get_by_no(
    State(state): State<AppState>,
    Path(transformer_no): Path<String>,
) -> AppResult<Json<DataResponse<Transformer>>> {
    let transformer = find_or_404(&state, transformer_no).await?;
    Ok(Json(DataResponse { data: transformer }))
}

/// GET /api/transformers/{transformer_no}/inspections
pub async fn list_inspections(
    State(state): State<AppState>,
    Path(transformer_no): Path<String>,
) -> AppResult<Json<DataResponse<Vec<Inspection>>>> {
    let transformer = find_or_404(&state, transformer_no).await?;
    let inspections =
        InspectionRepo::list_by_transformer(&state.pool, &transformer.transformer_no).await?;
    Ok(Json(DataResponse { data: inspections }))
}

async fn find_or_404(state: &AppState, transformer_no: String) -> AppResult<Transformer> {
    TransformerRepo::find_by_no(&state.pool, &transformer_no)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundByKey {
            entity: "Transformer",
            key: transformer_no,
        }))
}
