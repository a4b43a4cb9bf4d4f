use axum::routing::post;
use axum::Router;

use crate::handlers::thermal;
use crate::state::AppState;

/// Routes mounted at `/thermal`.
///
/// ```text
/// POST   /analyze                  -> analyze
/// POST   /analyze-by-ids           -> analyze_by_ids
/// POST   /analyze-with-baseline    -> analyze_with_baseline
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(thermal::analyze))
        .route("/analyze-by-ids", post(thermal::analyze_by_ids))
        .route("/analyze-with-baseline", post(thermal::analyze_with_baseline))
}
