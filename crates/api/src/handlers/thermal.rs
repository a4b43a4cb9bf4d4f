//! Handlers for the `/thermal` comparison routes.

use std::time::Instant;

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thermoscan_core::types::DbId;

use crate::multipart::FormData;
use crate::state::AppState;
use crate::thermal::PredictionOutcome;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeByIdsRequest {
    pub baseline_image_id: Option<DbId>,
    pub candidate_image_id: Option<DbId>,
}

/// POST /api/thermal/analyze
///
/// Multipart form with `baseline` and `candidate` image files.
pub async fn analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> PredictionOutcome {
    let started = Instant::now();
    let mut form = match read_form(multipart, started).await {
        Ok(form) => form,
        Err(outcome) => return outcome,
    };

    match (form.take_file("baseline"), form.take_file("candidate")) {
        (Some(baseline), Some(candidate)) => {
            state.thermal.analyze_uploads(baseline, candidate).await
        }
        _ => PredictionOutcome::failure(
            StatusCode::BAD_REQUEST,
            "Both 'baseline' and 'candidate' image files are required",
            started,
        ),
    }
}

/// POST /api/thermal/analyze-by-ids
pub async fn analyze_by_ids(
    State(state): State<AppState>,
    input: Result<Json<AnalyzeByIdsRequest>, JsonRejection>,
) -> PredictionOutcome {
    let Json(input) = match input {
        Ok(body) => body,
        Err(rejection) => return PredictionOutcome::rejected(rejection.body_text()),
    };
    match (input.baseline_image_id, input.candidate_image_id) {
        (Some(baseline), Some(candidate)) => {
            state
                .thermal
                .analyze_stored(&state.pool, baseline, candidate)
                .await
        }
        _ => PredictionOutcome::failure(
            StatusCode::BAD_REQUEST,
            "Both baselineImageId and candidateImageId are required",
            Instant::now(),
        ),
    }
}

/// POST /api/thermal/analyze-with-baseline
///
/// Multipart form with a stored `baselineImageId` and an uploaded
/// `candidate` file.
pub async fn analyze_with_baseline(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> PredictionOutcome {
    let started = Instant::now();
    let mut form = match read_form(multipart, started).await {
        Ok(form) => form,
        Err(outcome) => return outcome,
    };

    let baseline_id = match form.text("baselineImageId").map(str::parse::<DbId>) {
        Some(Ok(id)) => id,
        Some(Err(_)) => {
            return PredictionOutcome::failure(
                StatusCode::BAD_REQUEST,
                "baselineImageId must be an integer",
                started,
            )
        }
        None => {
            return PredictionOutcome::failure(
                StatusCode::BAD_REQUEST,
                "Missing required 'baselineImageId' field",
                started,
            )
        }
    };
    let Some(candidate) = form.take_file("candidate") else {
        return PredictionOutcome::failure(
            StatusCode::BAD_REQUEST,
            "Missing required 'candidate' image file",
            started,
        );
    };

    state
        .thermal
        .analyze_mixed(&state.pool, baseline_id, candidate)
        .await
}

/// Decode the multipart body, answering with the 400 envelope when the
/// request is not a readable form.
async fn read_form(
    multipart: Result<Multipart, MultipartRejection>,
    started: Instant,
) -> Result<FormData, PredictionOutcome> {
    let multipart = multipart.map_err(|r| PredictionOutcome::rejected(r.body_text()))?;
    FormData::read(multipart)
        .await
        .map_err(|e| PredictionOutcome::failure(StatusCode::BAD_REQUEST, e, started))
}
