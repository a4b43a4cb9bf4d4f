use axum::routing::{get, post};
use axum::Router;

use crate::handlers::analysis_result;
use crate::state::AppState;

/// Routes mounted at `/analysis-results`.
///
/// ```text
/// POST   /                                   -> create
/// GET    /inspection/{inspection_id}         -> list_by_inspection
/// GET    /inspection/{inspection_id}/boxes   -> list_boxes
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(analysis_result::create))
        .route(
            "/inspection/{inspection_id}",
            get(analysis_result::list_by_inspection),
        )
        .route(
            "/inspection/{inspection_id}/boxes",
            get(analysis_result::list_boxes),
        )
}
