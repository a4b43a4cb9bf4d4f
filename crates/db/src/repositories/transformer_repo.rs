//! Repository for the `transformers` table.

use sqlx::PgPool;

use crate::models::transformer::{CreateTransformer, Transformer};

/// Column list for transformers queries.
const COLUMNS: &str = "transformer_no, region, pole_no, type, location_details, created_at";

pub struct TransformerRepo;

impl TransformerRepo {
    /// Insert a transformer. Returns `None` when the number is already taken.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTransformer,
    ) -> Result<Option<Transformer>, sqlx::Error> {
        let query = format!(
            "INSERT INTO transformers (transformer_no, region, pole_no, type, location_details)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (transformer_no) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transformer>(&query)
            .bind(input.transformer_no.trim())
            .bind(&input.region)
            .bind(&input.pole_no)
            .bind(&input.r#type)
            .bind(&input.location_details)
            .fetch_optional(pool)
            .await
    }

    /// List all transformers, ordered by number.
    pub async fn list(pool: &PgPool) -> Result<Vec<Transformer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transformers ORDER BY transformer_no ASC");
        sqlx::query_as::<_, Transformer>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_no(
        pool: &PgPool,
        transformer_no: &str,
    ) -> Result<Option<Transformer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transformers WHERE transformer_no = $1");
        sqlx::query_as::<_, Transformer>(&query)
            .bind(transformer_no)
            .fetch_optional(pool)
            .await
    }
}
