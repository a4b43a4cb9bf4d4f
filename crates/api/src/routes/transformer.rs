use axum::routing::get;
use axum::Router;

use crate::handlers::transformer;
use crate::state::AppState;

/// Routes mounted at `/transformers`.
///
/// ```text
/// GET    /                                -> list
/// POST   /                                -> create
/// GET    /{transformer_no}                -> get_by_no
/// GET    /{transformer_no}/inspections    -> list_inspections
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(transformer::list).post(transformer::create))
        .route("/{transformer_no}", get(transformer::get_by_no))
        .route(
            "/{transformer_no}/inspections",
            get(transformer::list_inspections),
        )
}
