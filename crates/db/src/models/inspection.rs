//! Inspection model.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thermoscan_core::forms::{lenient_date, lenient_time};
use thermoscan_core::types::{DbId, Timestamp};
use validator::Validate;

/// Status given to inspections created without one.
pub const DEFAULT_STATUS: &str = "Pending";

/// A row from the `inspections` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub id: DbId,
    pub transformer_no: String,
    pub branch: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub status: String,
    pub maintenance_date: Option<NaiveDate>,
    pub created_at: Timestamp,
}

/// DTO for scheduling an inspection against an existing transformer.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInspection {
    #[validate(custom(function = "super::not_blank", message = "transformerNo is required"))]
    pub transformer_no: String,
    pub branch: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_time")]
    pub time: Option<NaiveTime>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub maintenance_date: Option<NaiveDate>,
}
