//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the repositories in `thermoscan_db` and map errors
//! via [`AppError`]. The `ml` and `thermal` handlers answer with the
//! prediction envelope instead.

pub mod analysis_result;
pub mod anomaly;
pub mod general_record;
pub mod inspection;
pub mod inspection_image;
pub mod maintenance_record;
pub mod ml;
pub mod pdf;
pub mod thermal;
pub mod transformer;
pub mod work_datasheet;

use thermoscan_core::error::CoreError;
use thermoscan_core::types::DbId;
use thermoscan_db::models::inspection::Inspection;
use thermoscan_db::repositories::InspectionRepo;

use crate::error::{AppError, AppResult};

/// Verify that an inspection exists, returning a 404 error if not.
pub(crate) async fn ensure_inspection_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Inspection> {
    InspectionRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Inspection",
            id,
        }))
}
