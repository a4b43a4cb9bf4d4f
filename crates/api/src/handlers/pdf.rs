//! Handlers for the `/pdf` report routes.
//!
//! Every route answers with a PDF attachment; failures use the usual JSON
//! error body.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Local, NaiveDate};
use thermoscan_core::error::CoreError;
use thermoscan_core::report::{render_pdf, Report};
use thermoscan_core::types::DbId;
use thermoscan_db::models::work_datasheet::WorkDatasheetFields;
use thermoscan_db::repositories::{GeneralRecordRepo, MaintenanceRecordRepo, WorkDatasheetRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_inspection_exists;
use crate::report::{self, CompleteReportRequest};
use crate::state::AppState;

const MOCK_FILE_NAME: &str = "transformer_complete_inspection_mock.pdf";
const CACHE_CONTROL: &str = "must-revalidate, post-check=0, pre-check=0";

/// GET /api/pdf/generate/mock
pub async fn mock() -> AppResult<Response> {
    let today = today();
    let report = report::complete_report(
        &report::mock_datasheet(today),
        Some(&report::mock_maintenance(today)),
        None,
        today,
    );
    pdf_attachment(&report, MOCK_FILE_NAME.to_string())
}

/// POST /api/pdf/generate
pub async fn generate(Json(sheet): Json<WorkDatasheetFields>) -> AppResult<Response> {
    let report = report::datasheet_report(&sheet, today());
    let name = report::file_name("transformer_inspection", sheet.serial_no.as_deref());
    pdf_attachment(&report, name)
}

/// POST /api/pdf/generate/complete
pub async fn generate_complete(Json(input): Json<CompleteReportRequest>) -> AppResult<Response> {
    let report = report::complete_report(
        &input.work_data_sheet,
        input.maintenance_record.as_ref(),
        input.general_record.as_ref(),
        today(),
    );
    let name = report::file_name(
        "transformer_complete",
        input.work_data_sheet.serial_no.as_deref(),
    );
    pdf_attachment(&report, name)
}

/// GET /api/pdf/generate/{id}
///
/// Report for a stored work datasheet.
pub async fn generate_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let sheet = WorkDatasheetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WorkDatasheet",
            id,
        }))?;

    let report = report::datasheet_report(&sheet.fields, today());
    let name = report::file_name("transformer_inspection", sheet.fields.serial_no.as_deref());
    pdf_attachment(&report, name)
}

/// GET /api/pdf/inspections/{inspection_id}
///
/// Complete report from the forms stored for one inspection. The work
/// datasheet is required; the other two forms are included when present.
pub async fn inspection_report(
    State(state): State<AppState>,
    Path(inspection_id): Path<DbId>,
) -> AppResult<Response> {
    ensure_inspection_exists(&state.pool, inspection_id).await?;

    let sheet = WorkDatasheetRepo::find_by_inspection(&state.pool, inspection_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "WorkDatasheet",
                key: format!("inspectionId={inspection_id}"),
            })
        })?;
    let maintenance = MaintenanceRecordRepo::find_by_inspection(&state.pool, inspection_id).await?;
    let general = GeneralRecordRepo::find_by_inspection(&state.pool, inspection_id).await?;

    let report = report::complete_report(
        &sheet.fields,
        maintenance.as_ref().map(|m| &m.fields),
        general.as_ref().map(|g| &g.fields),
        today(),
    );
    let name = report::file_name("transformer_complete", sheet.fields.serial_no.as_deref());
    pdf_attachment(&report, name)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn pdf_attachment(report: &Report, file_name: String) -> AppResult<Response> {
    let bytes = render_pdf(report).map_err(|e| AppError::InternalError(e.to_string()))?;
    tracing::debug!(file_name = %file_name, size = bytes.len(), "PDF report rendered");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
            (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
        ],
        bytes,
    )
        .into_response())
}
