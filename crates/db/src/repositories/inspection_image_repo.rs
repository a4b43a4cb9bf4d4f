//! Repository for the `inspection_images` table.

use sqlx::PgPool;
use thermoscan_core::types::DbId;

use crate::models::inspection_image::{CreateInspectionImage, InspectionImage};

/// Column list for inspection_images queries.
const COLUMNS: &str = "id, inspection_id, file_name, file_path, content_type, weather, created_at";

pub struct InspectionImageRepo;

impl InspectionImageRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateInspectionImage,
    ) -> Result<InspectionImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO inspection_images (inspection_id, file_name, file_path, content_type, weather)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InspectionImage>(&query)
            .bind(input.inspection_id)
            .bind(&input.file_name)
            .bind(&input.file_path)
            .bind(&input.content_type)
            .bind(&input.weather)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<InspectionImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inspection_images WHERE id = $1");
        sqlx::query_as::<_, InspectionImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the images of one inspection in upload order.
    pub async fn list_by_inspection(
        pool: &PgPool,
        inspection_id: DbId,
    ) -> Result<Vec<InspectionImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inspection_images WHERE inspection_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, InspectionImage>(&query)
            .bind(inspection_id)
            .fetch_all(pool)
            .await
    }
}
