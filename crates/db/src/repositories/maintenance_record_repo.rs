//! Repository for the `maintenance_records` table.

use sqlx::PgPool;
use thermoscan_core::types::DbId;

use crate::models::maintenance_record::{CreateMaintenanceRecord, MaintenanceRecord};

/// Column list for maintenance_records queries.
const COLUMNS: &str = "id, inspection_id, start_time, completion_time, supervised_by, \
    tech_i, tech_ii, tech_iii, helpers, inspected_by, inspected_date, \
    rectified_by, rectified_date, re_inspected_by, re_inspected_date, \
    css, css_date, all_spots_correct, css2, css2_date, created_at";

pub struct MaintenanceRecordRepo;

impl MaintenanceRecordRepo {
    /// Insert the maintenance record of an inspection.
    ///
    /// A second record for the same inspection violates
    /// `uq_maintenance_records_inspection_id`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMaintenanceRecord,
    ) -> Result<MaintenanceRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO maintenance_records (inspection_id, start_time, completion_time, \
                supervised_by, tech_i, tech_ii, tech_iii, helpers, inspected_by, inspected_date, \
                rectified_by, rectified_date, re_inspected_by, re_inspected_date, \
                css, css_date, all_spots_correct, css2, css2_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, \
                $14, $15, $16, $17, $18, $19) \
             RETURNING {COLUMNS}"
        );
        let f = &input.fields;
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(input.inspection_id)
            .bind(f.start_time)
            .bind(f.completion_time)
            .bind(&f.supervised_by)
            .bind(&f.tech_i)
            .bind(&f.tech_ii)
            .bind(&f.tech_iii)
            .bind(&f.helpers)
            .bind(&f.inspected_by)
            .bind(f.inspected_date)
            .bind(&f.rectified_by)
            .bind(f.rectified_date)
            .bind(&f.re_inspected_by)
            .bind(f.re_inspected_date)
            .bind(&f.css)
            .bind(f.css_date)
            .bind(f.all_spots_correct)
            .bind(&f.css2)
            .bind(f.css2_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MaintenanceRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maintenance_records WHERE id = $1");
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_inspection(
        pool: &PgPool,
        inspection_id: DbId,
    ) -> Result<Option<MaintenanceRecord>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM maintenance_records WHERE inspection_id = $1");
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(inspection_id)
            .fetch_optional(pool)
            .await
    }
}
