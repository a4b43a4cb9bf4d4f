//! Anomaly annotation model.
//!
//! Anomalies are created from loosely-typed payloads parsed by
//! [`thermoscan_core::anomaly`]; there is no `Deserialize` create DTO here.

use serde::Serialize;
use sqlx::FromRow;
use thermoscan_core::types::{DbId, Timestamp};

/// A row from the `anomalies` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub id: DbId,
    pub inspection_number: String,
    pub idx: i32,
    pub label: Option<String>,
    pub coords: Option<serde_json::Value>,
    pub confidence: Option<f32>,
    pub severity: Option<String>,
    pub area_frac: Option<f32>,
    pub is_manual: bool,
    pub created_by: Option<String>,
    pub deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub deleted_by: Option<String>,
    pub created_at: Timestamp,
}
