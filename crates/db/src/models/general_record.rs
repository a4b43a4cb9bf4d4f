//! General inspection record (digital form 1 of 3).

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thermoscan_core::forms::{lenient_date, lenient_f32, lenient_time};
use thermoscan_core::types::{DbId, Timestamp};

/// Form contents. Readings with a `2` suffix are the second measurement set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GeneralRecordFields {
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_time")]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub inspector_name: Option<String>,
    #[serde(default)]
    pub transformer_status: Option<String>,
    #[serde(default)]
    pub recommended_action: Option<String>,
    #[serde(default)]
    pub additional_remarks: Option<String>,
    #[serde(default, deserialize_with = "lenient_f32")]
    pub voltage_r: Option<f32>,
    #[serde(default, deserialize_with = "lenient_f32")]
    pub voltage_y: Option<f32>,
    #[serde(default, deserialize_with = "lenient_f32")]
    pub voltage_b: Option<f32>,
    #[serde(default, deserialize_with = "lenient_f32")]
    pub current_r: Option<f32>,
    #[serde(default, deserialize_with = "lenient_f32")]
    pub current_y: Option<f32>,
    #[serde(default, deserialize_with = "lenient_f32")]
    pub current_b: Option<f32>,
    #[serde(default, deserialize_with = "lenient_f32")]
    pub voltage_r2: Option<f32>,
    #[serde(default, deserialize_with = "lenient_f32")]
    pub voltage_y2: Option<f32>,
    #[serde(default, deserialize_with = "lenient_f32")]
    pub voltage_b2: Option<f32>,
    #[serde(default, deserialize_with = "lenient_f32")]
    pub current_r2: Option<f32>,
    #[serde(default, deserialize_with = "lenient_f32")]
    pub current_y2: Option<f32>,
    #[serde(default, deserialize_with = "lenient_f32")]
    pub current_b2: Option<f32>,
}

/// A row from the `general_records` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GeneralRecord {
    pub id: DbId,
    pub inspection_id: DbId,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub fields: GeneralRecordFields,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGeneralRecord {
    pub inspection_id: DbId,
    #[serde(flatten)]
    pub fields: GeneralRecordFields,
}
