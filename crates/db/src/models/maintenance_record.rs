//! Maintenance record (digital form 2 of 3).

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thermoscan_core::forms::{lenient_bool, lenient_date, lenient_time};
use thermoscan_core::types::{DbId, Timestamp};

/// Who did the work, who checked it, and when.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecordFields {
    #[serde(default, deserialize_with = "lenient_time")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "lenient_time")]
    pub completion_time: Option<NaiveTime>,
    #[serde(default)]
    pub supervised_by: Option<String>,
    #[serde(default)]
    pub tech_i: Option<String>,
    #[serde(default, alias = "techII")]
    pub tech_ii: Option<String>,
    #[serde(default, alias = "techIII")]
    pub tech_iii: Option<String>,
    #[serde(default)]
    pub helpers: Option<String>,
    #[serde(default)]
    pub inspected_by: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub inspected_date: Option<NaiveDate>,
    #[serde(default)]
    pub rectified_by: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub rectified_date: Option<NaiveDate>,
    #[serde(default)]
    pub re_inspected_by: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub re_inspected_date: Option<NaiveDate>,
    #[serde(default)]
    pub css: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub css_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub all_spots_correct: Option<bool>,
    #[serde(default)]
    pub css2: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub css2_date: Option<NaiveDate>,
}

/// A row from the `maintenance_records` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: DbId,
    pub inspection_id: DbId,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub fields: MaintenanceRecordFields,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceRecord {
    pub inspection_id: DbId,
    #[serde(flatten)]
    pub fields: MaintenanceRecordFields,
}
