//! Orchestration of thermal comparisons for the HTTP layer.
//!
//! [`ThermalService`] turns request inputs (paths, uploads, stored image
//! ids) into a pair of files on disk, runs the configured
//! [`ThermalAnalyzer`], and packages the outcome as a
//! [`PredictionResponse`] plus the HTTP status to send it with. Every exit,
//! failures included, produces the same envelope.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sqlx::PgPool;
use thermoscan_core::prediction::PredictionResponse;
use thermoscan_core::storage::{TempPath, UploadStore};
use thermoscan_core::thermal::{AnalysisError, ThermalAnalyzer, ThermalFinding};
use thermoscan_core::types::DbId;
use thermoscan_db::repositories::InspectionImageRepo;

use crate::multipart::Upload;

/// A prediction envelope paired with its HTTP status.
#[derive(Debug)]
pub struct PredictionOutcome {
    pub status: StatusCode,
    pub body: PredictionResponse,
}

impl PredictionOutcome {
    pub fn ok(body: PredictionResponse) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn failure(status: StatusCode, message: impl Into<String>, started: Instant) -> Self {
        Self {
            status,
            body: PredictionResponse::failure(message, started.elapsed()),
        }
    }

    /// 400 for a request body, path or form the extractor could not decode.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::failure(StatusCode::BAD_REQUEST, message, Instant::now())
    }
}

impl IntoResponse for PredictionOutcome {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Which side of a comparison a stored image id refers to.
#[derive(Debug, Clone, Copy)]
enum Side {
    Baseline,
    Candidate,
}

impl Side {
    fn label(self) -> &'static str {
        match self {
            Side::Baseline => "Baseline",
            Side::Candidate => "Candidate",
        }
    }
}

pub struct ThermalService {
    analyzer: Arc<dyn ThermalAnalyzer>,
    uploads: UploadStore,
}

impl ThermalService {
    pub fn new(analyzer: Arc<dyn ThermalAnalyzer>, uploads: UploadStore) -> Self {
        Self { analyzer, uploads }
    }

    /// Compare two files already on disk.
    pub async fn analyze_paths(&self, baseline: &Path, candidate: &Path) -> PredictionOutcome {
        let started = Instant::now();
        let result = self.analyzer.compare(baseline, candidate).await;
        self.finish(result, started)
    }

    /// Compare two uploaded files. Both are written to uniquely named
    /// temporary files that are deleted when this future completes or is
    /// dropped.
    pub async fn analyze_uploads(&self, baseline: Upload, candidate: Upload) -> PredictionOutcome {
        let started = Instant::now();

        let baseline_path = match self.store_temp(&baseline).await {
            Ok(path) => path,
            Err(e) => return self.storage_failure(e, started),
        };
        let candidate_path = match self.store_temp(&candidate).await {
            Ok(path) => path,
            Err(e) => return self.storage_failure(e, started),
        };

        let result = self.analyzer.compare(&baseline_path, &candidate_path).await;
        self.finish(result, started)
    }

    /// Compare two previously uploaded inspection images.
    pub async fn analyze_stored(
        &self,
        pool: &PgPool,
        baseline_id: DbId,
        candidate_id: DbId,
    ) -> PredictionOutcome {
        let started = Instant::now();

        let baseline = match resolve_image(pool, baseline_id, Side::Baseline, started).await {
            Ok(path) => path,
            Err(outcome) => return outcome,
        };
        let candidate = match resolve_image(pool, candidate_id, Side::Candidate, started).await {
            Ok(path) => path,
            Err(outcome) => return outcome,
        };

        let result = self.analyzer.compare(&baseline, &candidate).await;
        self.finish(result, started)
    }

    /// Compare a stored baseline image against a freshly uploaded candidate.
    pub async fn analyze_mixed(
        &self,
        pool: &PgPool,
        baseline_id: DbId,
        candidate: Upload,
    ) -> PredictionOutcome {
        let started = Instant::now();

        let baseline = match resolve_image(pool, baseline_id, Side::Baseline, started).await {
            Ok(path) => path,
            Err(outcome) => return outcome,
        };
        let candidate_path = match self.store_temp(&candidate).await {
            Ok(path) => path,
            Err(e) => return self.storage_failure(e, started),
        };

        let result = self.analyzer.compare(&baseline, &candidate_path).await;
        self.finish(result, started)
    }

    /// Answer a single-image request. Only the input is checked; there is
    /// no single-image model behind this.
    pub fn single_image(&self, path: &Path) -> PredictionOutcome {
        let started = Instant::now();
        if path.to_string_lossy().trim().is_empty() {
            return PredictionOutcome::failure(
                StatusCode::BAD_REQUEST,
                "Image path is required",
                started,
            );
        }
        if !path.exists() {
            return PredictionOutcome::failure(
                StatusCode::BAD_REQUEST,
                format!("Image file not found: {}", path.display()),
                started,
            );
        }
        PredictionOutcome::ok(PredictionResponse::single_image_unsupported(started.elapsed()))
    }

    /// Single-image answer for a stored inspection image.
    pub async fn single_stored_image(&self, pool: &PgPool, image_id: DbId) -> PredictionOutcome {
        let started = Instant::now();
        match InspectionImageRepo::find_by_id(pool, image_id).await {
            Ok(Some(image)) => self.single_image(Path::new(&image.file_path)),
            Ok(None) => PredictionOutcome::failure(
                StatusCode::NOT_FOUND,
                format!("Image not found with id: {image_id}"),
                started,
            ),
            Err(e) => lookup_failure(e, started),
        }
    }

    async fn store_temp(&self, upload: &Upload) -> std::io::Result<TempPath> {
        self.uploads.save_temp(&upload.file_name, &upload.bytes).await
    }

    fn storage_failure(&self, err: std::io::Error, started: Instant) -> PredictionOutcome {
        tracing::error!(error = %err, "Failed to store image for analysis");
        PredictionOutcome::failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to store uploaded image: {err}"),
            started,
        )
    }

    fn finish(
        &self,
        result: Result<ThermalFinding, AnalysisError>,
        started: Instant,
    ) -> PredictionOutcome {
        match result {
            Ok(finding) => {
                tracing::info!(
                    fault_type = %finding.fault_type,
                    prob = finding.prob,
                    boxes = finding.boxes.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Thermal analysis complete",
                );
                PredictionOutcome::ok(PredictionResponse::from_finding(
                    finding,
                    self.analyzer.label(),
                    started.elapsed(),
                ))
            }
            Err(err) => {
                tracing::warn!(error = %err, "Thermal analysis failed");
                let status = if err.is_input_error() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                PredictionOutcome::failure(status, err.to_string(), started)
            }
        }
    }
}

/// Stored file path of an inspection image, or the 404/500 envelope.
async fn resolve_image(
    pool: &PgPool,
    id: DbId,
    side: Side,
    started: Instant,
) -> Result<PathBuf, PredictionOutcome> {
    match InspectionImageRepo::find_by_id(pool, id).await {
        Ok(Some(image)) => Ok(PathBuf::from(image.file_path)),
        Ok(None) => Err(PredictionOutcome::failure(
            StatusCode::NOT_FOUND,
            format!("{} image not found with id: {id}", side.label()),
            started,
        )),
        Err(e) => Err(lookup_failure(e, started)),
    }
}

fn lookup_failure(err: sqlx::Error, started: Instant) -> PredictionOutcome {
    tracing::error!(error = %err, "Image lookup failed");
    PredictionOutcome::failure(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to load image record",
        started,
    )
}
