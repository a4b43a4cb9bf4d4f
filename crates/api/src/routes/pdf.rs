use axum::routing::{get, post};
use axum::Router;

use crate::handlers::pdf;
use crate::state::AppState;

/// Routes mounted at `/pdf`.
///
/// ```text
/// POST   /generate                       -> generate
/// POST   /generate/complete              -> generate_complete
/// GET    /generate/mock                  -> mock
/// GET    /generate/{id}                  -> generate_by_id
/// GET    /inspections/{inspection_id}    -> inspection_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(pdf::generate))
        .route("/generate/complete", post(pdf::generate_complete))
        .route("/generate/mock", get(pdf::mock))
        .route("/generate/{id}", get(pdf::generate_by_id))
        .route("/inspections/{inspection_id}", get(pdf::inspection_report))
}
