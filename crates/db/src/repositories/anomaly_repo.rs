//! Repository for the `anomalies` table.
//!
//! Anomalies are addressed either by id or by the `(inspection_number, idx)`
//! pair the annotation UI uses. That pair is not unique, so deletes by key
//! affect every matching row.

use sqlx::PgPool;
use thermoscan_core::anomaly::{AnomalyDraft, AnomalyKey};
use thermoscan_core::types::DbId;

use crate::models::anomaly::Anomaly;

/// Column list for anomalies queries.
const COLUMNS: &str = "id, inspection_number, idx, label, coords, confidence, severity, \
    area_frac, is_manual, created_by, deleted, deleted_at, deleted_by, created_at";

pub struct AnomalyRepo;

impl AnomalyRepo {
    /// Insert every draft in one transaction, returning the new rows.
    pub async fn insert_many(
        pool: &PgPool,
        drafts: &[AnomalyDraft],
    ) -> Result<Vec<Anomaly>, sqlx::Error> {
        let query = format!(
            "INSERT INTO anomalies (inspection_number, idx, label, coords, confidence, \
                severity, area_frac, is_manual, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let mut inserted = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let row = sqlx::query_as::<_, Anomaly>(&query)
                .bind(&draft.inspection_number)
                .bind(draft.idx)
                .bind(&draft.label)
                .bind(&draft.coords)
                .bind(draft.confidence)
                .bind(&draft.severity)
                .bind(draft.area_frac)
                .bind(draft.is_manual)
                .bind(&draft.created_by)
                .fetch_one(&mut *tx)
                .await?;
            inserted.push(row);
        }
        tx.commit().await?;
        Ok(inserted)
    }

    /// All anomalies of an inspection, soft-deleted ones included.
    pub async fn list_by_inspection_number(
        pool: &PgPool,
        inspection_number: &str,
    ) -> Result<Vec<Anomaly>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM anomalies WHERE inspection_number = $1 ORDER BY idx ASC, id ASC"
        );
        sqlx::query_as::<_, Anomaly>(&query)
            .bind(inspection_number)
            .fetch_all(pool)
            .await
    }

    /// Find an anomaly by id, whether or not it has been soft-deleted.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Anomaly>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM anomalies WHERE id = $1");
        sqlx::query_as::<_, Anomaly>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete every anomaly matching `key`. Returns the count.
    pub async fn hard_delete_by_key(pool: &PgPool, key: &AnomalyKey) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM anomalies WHERE inspection_number = $1 AND idx = $2")
            .bind(&key.inspection_number)
            .bind(key.idx)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Flag every anomaly matching `key` as deleted, recording who and when.
    /// Returns the number of rows updated.
    pub async fn soft_delete_by_key(
        pool: &PgPool,
        key: &AnomalyKey,
        deleted_by: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE anomalies SET deleted = true, deleted_at = NOW(), deleted_by = $3 \
             WHERE inspection_number = $1 AND idx = $2",
        )
        .bind(&key.inspection_number)
        .bind(key.idx)
        .bind(deleted_by)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
