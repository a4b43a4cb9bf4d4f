//! Route definitions for the three digital inspection forms.
//!
//! All three share one shape:
//!
//! ```text
//! POST   /                              -> create
//! GET    /{id}                          -> get_by_id
//! GET    /inspection/{inspection_id}    -> get_by_inspection
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{general_record, maintenance_record, work_datasheet};
use crate::state::AppState;

/// Routes mounted at `/general-records`.
pub fn general_record_router() -> Router<AppState> {
    Router::new()
        .route("/", post(general_record::create))
        .route("/{id}", get(general_record::get_by_id))
        .route(
            "/inspection/{inspection_id}",
            get(general_record::get_by_inspection),
        )
}

/// Routes mounted at `/maintenance-records`.
pub fn maintenance_record_router() -> Router<AppState> {
    Router::new()
        .route("/", post(maintenance_record::create))
        .route("/{id}", get(maintenance_record::get_by_id))
        .route(
            "/inspection/{inspection_id}",
            get(maintenance_record::get_by_inspection),
        )
}

/// Routes mounted at `/work-datasheets`.
pub fn work_datasheet_router() -> Router<AppState> {
    Router::new()
        .route("/", post(work_datasheet::create))
        .route("/{id}", get(work_datasheet::get_by_id))
        .route(
            "/inspection/{inspection_id}",
            get(work_datasheet::get_by_inspection),
        )
}
