//! Repository for the `bounding_boxes` table.

use sqlx::{PgPool, Postgres, Transaction};
use thermoscan_core::boxes::BoxRecord;
use thermoscan_core::types::DbId;

use crate::models::analysis_result::InspectionBox;

/// Column list for bounding_boxes queries.
const COLUMNS: &str = "id, inspection_id, analysis_result_id, box_index, x, y, w, h, \
    area_frac, aspect, overlap_center_frac, label, box_fault, created_at";

pub struct InspectionBoxRepo;

impl InspectionBoxRepo {
    /// Insert boxes inside an existing transaction.
    pub(crate) async fn insert_many_in(
        tx: &mut Transaction<'_, Postgres>,
        inspection_id: Option<&str>,
        analysis_result_id: DbId,
        boxes: &[BoxRecord],
    ) -> Result<Vec<InspectionBox>, sqlx::Error> {
        let query = format!(
            "INSERT INTO bounding_boxes (inspection_id, analysis_result_id, box_index, \
                x, y, w, h, area_frac, aspect, overlap_center_frac, label, box_fault) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );

        let mut saved = Vec::with_capacity(boxes.len());
        for b in boxes {
            let row = sqlx::query_as::<_, InspectionBox>(&query)
                .bind(inspection_id)
                .bind(analysis_result_id)
                .bind(b.box_index)
                .bind(b.x)
                .bind(b.y)
                .bind(b.w)
                .bind(b.h)
                .bind(b.area_frac)
                .bind(b.aspect)
                .bind(b.overlap_center_frac)
                .bind(&b.label)
                .bind(&b.box_fault)
                .fetch_one(&mut **tx)
                .await?;
            saved.push(row);
        }
        Ok(saved)
    }

    /// Boxes recorded for an inspection, grouped by result then position.
    pub async fn list_by_inspection(
        pool: &PgPool,
        inspection_id: &str,
    ) -> Result<Vec<InspectionBox>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bounding_boxes WHERE inspection_id = $1 \
             ORDER BY analysis_result_id ASC, box_index ASC"
        );
        sqlx::query_as::<_, InspectionBox>(&query)
            .bind(inspection_id)
            .fetch_all(pool)
            .await
    }
}
