//! Handlers for stored analysis results and their bounding boxes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use thermoscan_core::boxes::extract_box_records;
use thermoscan_core::error::CoreError;
use thermoscan_core::types::DbId;
use thermoscan_db::models::analysis_result::{AnalysisResult, CreateAnalysisResult, InspectionBox};
use thermoscan_db::repositories::{AnalysisResultRepo, InspectionBoxRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAnalysis {
    pub analysis_result_id: DbId,
    pub saved_box_count: usize,
    pub saved_box_ids: Vec<DbId>,
}

/// POST /api/analysis-results
///
/// Stores the raw result and one box row per object in `result.boxInfo`.
/// A missing or malformed `boxInfo` just saves no boxes.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAnalysisResult>,
) -> AppResult<(StatusCode, Json<SavedAnalysis>)> {
    if input.result.is_null() {
        return Err(CoreError::Validation("result is required".into()).into());
    }

    let inspection_id = input.inspection_ref();
    let boxes = extract_box_records(&input.result);
    let (stored, saved) = AnalysisResultRepo::create_with_boxes(
        &state.pool,
        inspection_id.as_deref(),
        &input.result,
        &boxes,
    )
    .await?;

    tracing::info!(
        analysis_result_id = stored.id,
        inspection_id = ?inspection_id,
        boxes = saved.len(),
        "Analysis result saved",
    );
    Ok((
        StatusCode::CREATED,
        Json(SavedAnalysis {
            analysis_result_id: stored.id,
            saved_box_count: saved.len(),
            saved_box_ids: saved.iter().map(|b| b.id).collect(),
        }),
    ))
}

/// GET /api/analysis-results/inspection/{inspection_id}
pub async fn list_by_inspection(
    State(state): State<AppState>,
    Path(inspection_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<AnalysisResult>>>> {
    let results = AnalysisResultRepo::list_by_inspection(&state.pool, &inspection_id).await?;
    Ok(Json(DataResponse { data: results }))
}

/// GET /api/analysis-results/inspection/{inspection_id}/boxes
pub async fn list_boxes(
    State(state): State<AppState>,
    Path(inspection_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<InspectionBox>>>> {
    let boxes = InspectionBoxRepo::list_by_inspection(&state.pool, &inspection_id).await?;
    Ok(Json(DataResponse { data: boxes }))
}
