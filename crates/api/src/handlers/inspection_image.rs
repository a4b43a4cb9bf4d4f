//! Handlers for inspection image upload and retrieval.

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::header::{self, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thermoscan_core::error::CoreError;
use thermoscan_core::types::DbId;
use thermoscan_db::models::inspection_image::{CreateInspectionImage, InspectionImage};
use thermoscan_db::repositories::InspectionImageRepo;
use tokio_util::io::ReaderStream;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_inspection_exists;
use crate::multipart::FormData;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/images
///
/// Multipart form with `inspectionId`, `file` and an optional `weather`
/// note. The file is stored under its own (sanitized) name, replacing any
/// earlier upload with the same name.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<InspectionImage>>)> {
    let mut form = FormData::read(multipart).await.map_err(AppError::BadRequest)?;

    let inspection_id: DbId = form
        .text("inspectionId")
        .ok_or_else(|| AppError::BadRequest("Missing required 'inspectionId' field".into()))?
        .parse()
        .map_err(|_| AppError::BadRequest("inspectionId must be an integer".into()))?;
    let weather = form.text("weather").map(str::to_string);
    let file = form
        .take_file("file")
        .ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    ensure_inspection_exists(&state.pool, inspection_id).await?;

    let stored = state
        .uploads
        .save(&file.file_name, &file.bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    let input = CreateInspectionImage {
        inspection_id,
        file_name: stored.file_name,
        file_path: stored.path.to_string_lossy().to_string(),
        content_type: Some(file.content_type),
        weather,
    };
    let image = InspectionImageRepo::create(&state.pool, &input).await?;

    tracing::info!(
        image_id = image.id,
        inspection_id,
        size = file.bytes.len(),
        "Inspection image uploaded",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}

/// GET /api/images/{id}
///
/// Streams the stored file with the content type recorded at upload.
pub async fn get_file(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Response> {
    let image = InspectionImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "InspectionImage",
            id,
        }))?;

    let file = match tokio::fs::File::open(&image.file_path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(image_id = id, path = %image.file_path, "Image file missing on disk");
            return Err(AppError::Core(CoreError::NotFound {
                entity: "ImageFile",
                id,
            }));
        }
        Err(e) => return Err(AppError::InternalError(e.to_string())),
    };

    let content_type = image
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
        .unwrap_or_else(|| HeaderValue::from_static("application/octet-stream"));

    let body = Body::from_stream(ReaderStream::new(file));
    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}
