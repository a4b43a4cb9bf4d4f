//! Stored analysis results and the boxes extracted from them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thermoscan_core::types::{DbId, Timestamp};

/// A row from the `analysis_results` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub id: DbId,
    /// Free-form inspection reference supplied by the client.
    pub inspection_id: Option<String>,
    #[serde(rename = "result")]
    pub result_json: serde_json::Value,
    pub created_at: Timestamp,
}

/// Request body for saving an analysis result.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnalysisResult {
    #[serde(default)]
    pub inspection_id: Option<serde_json::Value>,
    #[serde(default)]
    pub result: serde_json::Value,
}

impl CreateAnalysisResult {
    /// The inspection reference as text, whether it was sent as a string or
    /// a number.
    pub fn inspection_ref(&self) -> Option<String> {
        match self.inspection_id.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// A row from the `bounding_boxes` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InspectionBox {
    pub id: DbId,
    pub inspection_id: Option<String>,
    pub analysis_result_id: Option<DbId>,
    pub box_index: i32,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub area_frac: f64,
    pub aspect: f64,
    pub overlap_center_frac: f64,
    pub label: String,
    pub box_fault: String,
    pub created_at: Timestamp,
}
