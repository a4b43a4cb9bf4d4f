//! Repository for the `work_datasheets` table.

use sqlx::PgPool;
use thermoscan_core::types::DbId;

use crate::models::work_datasheet::{CreateWorkDatasheet, WorkDatasheet};

/// Column list for work_datasheets queries.
const COLUMNS: &str = "id, inspection_id, gang_leader, work_date, job_started_time, \
    job_completed_time, serial_no, kva, make, tap_position, tx_ct_ratio, manufacture_year, \
    earth_resistance, neutral_resistance, surge_or_body, \
    fds_f1, fds_f2, fds_f3, fds_f4, fds_f5, \
    fds_f1_value, fds_f2_value, fds_f3_value, fds_f4_value, fds_f5_value, work_notes, \
    material_16mm2_copper_used, material_70mm2_abc_used, material_14mm2_aluminum_used, \
    material_50mm2_earth_used, material_60mm2_aac_used, material_16mm2_copper_lug_used, \
    material_50mm2_copper_lug_used, material_2_5mm2_ct_lug_used, \
    material_35mm2_bimetallic_lug_used, material_50mm2_bimetallic_lug_used, created_at";

pub struct WorkDatasheetRepo;

impl WorkDatasheetRepo {
    /// Insert the work datasheet of an inspection.
    ///
    /// A second datasheet for the same inspection violates
    /// `uq_work_datasheets_inspection_id`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWorkDatasheet,
    ) -> Result<WorkDatasheet, sqlx::Error> {
        let query = format!(
            "INSERT INTO work_datasheets (inspection_id, gang_leader, work_date, \
                job_started_time, job_completed_time, serial_no, kva, make, tap_position, \
                tx_ct_ratio, manufacture_year, earth_resistance, neutral_resistance, \
                surge_or_body, fds_f1, fds_f2, fds_f3, fds_f4, fds_f5, \
                fds_f1_value, fds_f2_value, fds_f3_value, fds_f4_value, fds_f5_value, \
                work_notes, material_16mm2_copper_used, material_70mm2_abc_used, \
                material_14mm2_aluminum_used, material_50mm2_earth_used, \
                material_60mm2_aac_used, material_16mm2_copper_lug_used, \
                material_50mm2_copper_lug_used, material_2_5mm2_ct_lug_used, \
                material_35mm2_bimetallic_lug_used, material_50mm2_bimetallic_lug_used) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, \
                $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, \
                $30, $31, $32, $33, $34, $35) \
             RETURNING {COLUMNS}"
        );
        let f = &input.fields;
        sqlx::query_as::<_, WorkDatasheet>(&query)
            .bind(input.inspection_id)
            .bind(&f.gang_leader)
            .bind(f.work_date)
            .bind(f.job_started_time)
            .bind(f.job_completed_time)
            .bind(&f.serial_no)
            .bind(&f.kva)
            .bind(&f.make)
            .bind(&f.tap_position)
            .bind(&f.tx_ct_ratio)
            .bind(&f.manufacture_year)
            .bind(f.earth_resistance)
            .bind(f.neutral_resistance)
            .bind(&f.surge_or_body)
            .bind(f.fds_f1)
            .bind(f.fds_f2)
            .bind(f.fds_f3)
            .bind(f.fds_f4)
            .bind(f.fds_f5)
            .bind(f.fds_f1_value)
            .bind(f.fds_f2_value)
            .bind(f.fds_f3_value)
            .bind(f.fds_f4_value)
            .bind(f.fds_f5_value)
            .bind(&f.work_notes)
            .bind(f.material_16mm2_copper_used)
            .bind(f.material_70mm2_abc_used)
            .bind(f.material_14mm2_aluminum_used)
            .bind(f.material_50mm2_earth_used)
            .bind(f.material_60mm2_aac_used)
            .bind(f.material_16mm2_copper_lug_used)
            .bind(f.material_50mm2_copper_lug_used)
            .bind(f.material_2_5mm2_ct_lug_used)
            .bind(f.material_35mm2_bimetallic_lug_used)
            .bind(f.material_50mm2_bimetallic_lug_used)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WorkDatasheet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM work_datasheets WHERE id = $1");
        sqlx::query_as::<_, WorkDatasheet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_inspection(
        pool: &PgPool,
        inspection_id: DbId,
    ) -> Result<Option<WorkDatasheet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM work_datasheets WHERE inspection_id = $1");
        sqlx::query_as::<_, WorkDatasheet>(&query)
            .bind(inspection_id)
            .fetch_optional(pool)
            .await
    }
}
