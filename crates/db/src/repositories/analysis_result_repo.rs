//! Repository for the `analysis_results` table.

use sqlx::PgPool;
use thermoscan_core::boxes::BoxRecord;

use crate::models::analysis_result::{AnalysisResult, InspectionBox};
use crate::repositories::InspectionBoxRepo;

/// Column list for analysis_results queries.
const COLUMNS: &str = "id, inspection_id, result_json, created_at";

pub struct AnalysisResultRepo;

impl AnalysisResultRepo {
    /// Store a raw analysis result together with its extracted boxes.
    ///
    /// Both writes happen in one transaction.
    pub async fn create_with_boxes(
        pool: &PgPool,
        inspection_id: Option<&str>,
        result: &serde_json::Value,
        boxes: &[BoxRecord],
    ) -> Result<(AnalysisResult, Vec<InspectionBox>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO analysis_results (inspection_id, result_json) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        let stored = sqlx::query_as::<_, AnalysisResult>(&query)
            .bind(inspection_id)
            .bind(result)
            .fetch_one(&mut *tx)
            .await?;

        let saved = InspectionBoxRepo::insert_many_in(&mut tx, inspection_id, stored.id, boxes).await?;

        tx.commit().await?;
        Ok((stored, saved))
    }

    /// Results stored for an inspection, oldest first.
    pub async fn list_by_inspection(
        pool: &PgPool,
        inspection_id: &str,
    ) -> Result<Vec<AnalysisResult>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM analysis_results WHERE inspection_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, AnalysisResult>(&query)
            .bind(inspection_id)
            .fetch_all(pool)
            .await
    }
}
