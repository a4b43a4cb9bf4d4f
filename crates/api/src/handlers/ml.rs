//! Handlers for the `/ml` prediction routes.
//!
//! A request naming both a baseline and a candidate (or asking for
//! `thermal_analysis` explicitly) runs a thermal comparison. Anything else
//! is a single-image request, which only gets its input checked.

use std::path::Path as FsPath;

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thermoscan_core::prediction::PredictionResponse;
use thermoscan_core::types::DbId;

use crate::multipart::FormData;
use crate::state::AppState;
use crate::thermal::PredictionOutcome;

/// `modelType` that forces a thermal comparison.
pub const THERMAL_MODEL_TYPE: &str = "thermal_analysis";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    pub baseline_image_path: Option<String>,
    pub candidate_image_path: Option<String>,
    pub image_path: Option<String>,
    pub model_type: Option<String>,
    /// Accepted for compatibility; the analysis takes no tuning parameters.
    pub parameters: Option<serde_json::Value>,
}

impl PredictRequest {
    fn wants_thermal(&self) -> bool {
        self.model_type.as_deref() == Some(THERMAL_MODEL_TYPE)
            || (self.baseline_image_path.is_some() && self.candidate_image_path.is_some())
    }
}

/// POST /api/ml/predict
pub async fn predict(
    State(state): State<AppState>,
    input: Result<Json<PredictRequest>, JsonRejection>,
) -> PredictionOutcome {
    let Json(input) = match input {
        Ok(body) => body,
        Err(rejection) => return PredictionOutcome::rejected(rejection.body_text()),
    };
    if input.wants_thermal() {
        let baseline = input.baseline_image_path.as_deref().unwrap_or_default();
        let candidate = input.candidate_image_path.as_deref().unwrap_or_default();
        state
            .thermal
            .analyze_paths(FsPath::new(baseline), FsPath::new(candidate))
            .await
    } else {
        let path = input.image_path.as_deref().unwrap_or_default();
        state.thermal.single_image(FsPath::new(path))
    }
}

/// POST /api/ml/predict-image/{id}
pub async fn predict_image(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> PredictionOutcome {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return PredictionOutcome::rejected(rejection.body_text()),
    };
    state.thermal.single_stored_image(&state.pool, id).await
}

/// POST /api/ml/predict-upload
///
/// Multipart form with `file` and an optional `modelType`.
pub async fn predict_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> PredictionOutcome {
    let started = std::time::Instant::now();
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => return PredictionOutcome::rejected(rejection.body_text()),
    };
    let mut form = match FormData::read(multipart).await {
        Ok(form) => form,
        Err(e) => return PredictionOutcome::failure(StatusCode::BAD_REQUEST, e, started),
    };

    if form.take_file("file").is_none() {
        return PredictionOutcome::failure(
            StatusCode::BAD_REQUEST,
            "Missing required 'file' field",
            started,
        );
    }
    PredictionOutcome::ok(PredictionResponse::single_image_unsupported(started.elapsed()))
}
