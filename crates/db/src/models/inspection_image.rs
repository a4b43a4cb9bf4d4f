//! Inspection image model.

use serde::Serialize;
use sqlx::FromRow;
use thermoscan_core::types::{DbId, Timestamp};

/// A row from the `inspection_images` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InspectionImage {
    pub id: DbId,
    pub inspection_id: DbId,
    pub file_name: String,
    pub file_path: String,
    pub content_type: Option<String>,
    pub weather: Option<String>,
    pub created_at: Timestamp,
}

/// Metadata recorded for an uploaded image. Built by the upload handler
/// after the file has been written, never deserialized from a request.
#[derive(Debug, Clone)]
pub struct CreateInspectionImage {
    pub inspection_id: DbId,
    pub file_name: String,
    pub file_path: String,
    pub content_type: Option<String>,
    pub weather: Option<String>,
}
