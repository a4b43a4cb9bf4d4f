//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//!
//! Inspection forms are immutable once created, so they have no update DTOs.
//! Their field sets live in a separate `*Fields` struct shared by the row,
//! the create DTO, and the PDF report builders.

pub mod analysis_result;
pub mod anomaly;
pub mod general_record;
pub mod inspection;
pub mod inspection_image;
pub mod maintenance_record;
pub mod transformer;
pub mod work_datasheet;

use validator::ValidationError;

/// Reject strings that are empty after trimming.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
