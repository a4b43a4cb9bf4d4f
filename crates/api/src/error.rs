//! Error type for the CRUD and report handlers.
//!
//! Every [`AppError`] renders as `{ "error": <message>, "code": <CODE> }`.
//! The ML and thermal routes do not use it; they answer with the prediction
//! envelope even on failure.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thermoscan_core::error::CoreError;
use validator::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed request input that never reached the domain layer.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Logged in full; clients only see a generic message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// HTTP status, machine-readable code and client-facing message.
type ErrorParts = (StatusCode, &'static str, String);

impl From<ValidationErrors> for AppError {
    /// One 400 message built from the DTO's declared messages, sorted so
    /// the text is stable across runs.
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        messages.sort();
        AppError::Core(CoreError::Validation(messages.join("; ")))
    }
}

impl AppError {
    fn parts(&self) -> ErrorParts {
        match self {
            AppError::Core(core) => core_parts(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => internal("Internal error", msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = json!({ "error": message, "code": code });
        (status, axum::Json(body)).into_response()
    }
}

fn core_parts(err: &CoreError) -> ErrorParts {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::NotFoundByKey { entity, key } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with key {key} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Internal(msg) => internal("Internal core error", msg),
    }
}

/// Map a sqlx error onto a response.
///
/// `RowNotFound` is 404. A unique violation on a `uq_*` constraint (one form
/// per inspection) is 409, and a foreign-key violation means the parent row
/// is gone, so 404. Anything else is a sanitized 500.
fn classify_sqlx_error(err: &sqlx::Error) -> ErrorParts {
    let sqlx::Error::Database(db_err) = err else {
        if matches!(err, sqlx::Error::RowNotFound) {
            return (StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found".to_string());
        }
        return internal("Database error", err);
    };

    let constraint = db_err.constraint().unwrap_or("unknown");
    match db_err.code().as_deref() {
        Some("23505") if constraint.starts_with("uq_") => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Duplicate value violates unique constraint: {constraint}"),
        ),
        Some("23503") => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("Referenced record does not exist: {constraint}"),
        ),
        _ => internal("Database error", db_err),
    }
}

fn internal(context: &str, err: impl std::fmt::Display) -> ErrorParts {
    tracing::error!(error = %err, "{context}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
