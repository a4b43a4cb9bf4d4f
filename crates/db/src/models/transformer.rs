//! Transformer model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thermoscan_core::types::Timestamp;
use validator::Validate;

/// A row from the `transformers` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Transformer {
    pub transformer_no: String,
    pub region: Option<String>,
    pub pole_no: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub r#type: Option<String>,
    pub location_details: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for registering a transformer.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransformer {
    #[validate(custom(function = "super::not_blank", message = "transformerNo is required"))]
    pub transformer_no: String,
    pub region: Option<String>,
    pub pole_no: Option<String>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub location_details: Option<String>,
}
