//! Repository for the `inspections` table.

use sqlx::PgPool;
use thermoscan_core::types::DbId;

use crate::models::inspection::{CreateInspection, Inspection, DEFAULT_STATUS};

/// Column list for inspections queries.
const COLUMNS: &str =
    "id, transformer_no, branch, date, time, status, maintenance_date, created_at";

pub struct InspectionRepo;

impl InspectionRepo {
    /// Insert an inspection. The transformer must already exist.
    pub async fn create(
        pool: &PgPool,
        input: &CreateInspection,
    ) -> Result<Inspection, sqlx::Error> {
        let query = format!(
            "INSERT INTO inspections (transformer_no, branch, date, time, status, maintenance_date)
             VALUES ($1, $2, $3, $4, COALESCE(NULLIF(TRIM($5), ''), $6), $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inspection>(&query)
            .bind(input.transformer_no.trim())
            .bind(&input.branch)
            .bind(input.date)
            .bind(input.time)
            .bind(&input.status)
            .bind(DEFAULT_STATUS)
            .bind(input.maintenance_date)
            .fetch_one(pool)
            .await
    }

    /// List all inspections, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Inspection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inspections ORDER BY id DESC");
        sqlx::query_as::<_, Inspection>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Inspection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inspections WHERE id = $1");
        sqlx::query_as::<_, Inspection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the inspections of one transformer, newest first.
    pub async fn list_by_transformer(
        pool: &PgPool,
        transformer_no: &str,
    ) -> Result<Vec<Inspection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inspections WHERE transformer_no = $1 ORDER BY id DESC"
        );
        sqlx::query_as::<_, Inspection>(&query)
            .bind(transformer_no)
            .fetch_all(pool)
            .await
    }
}
