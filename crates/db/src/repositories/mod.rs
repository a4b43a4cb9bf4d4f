//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod analysis_result_repo;
pub mod anomaly_repo;
pub mod general_record_repo;
pub mod inspection_box_repo;
pub mod inspection_image_repo;
pub mod inspection_repo;
pub mod maintenance_record_repo;
pub mod transformer_repo;
pub mod work_datasheet_repo;

pub use analysis_result_repo::AnalysisResultRepo;
pub use anomaly_repo::AnomalyRepo;
pub use general_record_repo::GeneralRecordRepo;
pub use inspection_box_repo::InspectionBoxRepo;
pub use inspection_image_repo::InspectionImageRepo;
pub use inspection_repo::InspectionRepo;
pub use maintenance_record_repo::MaintenanceRecordRepo;
pub use transformer_repo::TransformerRepo;
pub use work_datasheet_repo::WorkDatasheetRepo;
