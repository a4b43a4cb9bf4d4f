//! Repository for the `general_records` table.

use sqlx::PgPool;
use thermoscan_core::types::DbId;

use crate::models::general_record::{CreateGeneralRecord, GeneralRecord};

/// Column list for general_records queries.
const COLUMNS: &str = "id, inspection_id, date, time, inspector_name, transformer_status, \
    recommended_action, additional_remarks, \
    voltage_r, voltage_y, voltage_b, current_r, current_y, current_b, \
    voltage_r2, voltage_y2, voltage_b2, current_r2, current_y2, current_b2, created_at";

pub struct GeneralRecordRepo;

impl GeneralRecordRepo {
    /// Insert the general record of an inspection.
    ///
    /// A second record for the same inspection violates
    /// `uq_general_records_inspection_id`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGeneralRecord,
    ) -> Result<GeneralRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO general_records (inspection_id, date, time, inspector_name, \
                transformer_status, recommended_action, additional_remarks, \
                voltage_r, voltage_y, voltage_b, current_r, current_y, current_b, \
                voltage_r2, voltage_y2, voltage_b2, current_r2, current_y2, current_b2) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, \
                $14, $15, $16, $17, $18, $19) \
             RETURNING {COLUMNS}"
        );
        let f = &input.fields;
        sqlx::query_as::<_, GeneralRecord>(&query)
            .bind(input.inspection_id)
            .bind(f.date)
            .bind(f.time)
            .bind(&f.inspector_name)
            .bind(&f.transformer_status)
            .bind(&f.recommended_action)
            .bind(&f.additional_remarks)
            .bind(f.voltage_r)
            .bind(f.voltage_y)
            .bind(f.voltage_b)
            .bind(f.current_r)
            .bind(f.current_y)
            .bind(f.current_b)
            .bind(f.voltage_r2)
            .bind(f.voltage_y2)
            .bind(f.voltage_b2)
            .bind(f.current_r2)
            .bind(f.current_y2)
            .bind(f.current_b2)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<GeneralRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM general_records WHERE id = $1");
        sqlx::query_as::<_, GeneralRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_inspection(
        pool: &PgPool,
        inspection_id: DbId,
    ) -> Result<Option<GeneralRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM general_records WHERE inspection_id = $1");
        sqlx::query_as::<_, GeneralRecord>(&query)
            .bind(inspection_id)
            .fetch_optional(pool)
            .await
    }
}
