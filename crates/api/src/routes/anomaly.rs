use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::anomaly;
use crate::state::AppState;

/// Routes mounted at `/anomalies`.
///
/// ```text
/// POST   /insert                   -> insert
/// DELETE /delete                   -> hard_delete
/// PATCH  /delete                   -> soft_delete
/// GET    /by-id/{id}               -> get_by_id
/// GET    /{inspection_number}      -> list_by_inspection
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/insert", post(anomaly::insert))
        .route(
            "/delete",
            delete(anomaly::hard_delete).patch(anomaly::soft_delete),
        )
        .route("/by-id/{id}", get(anomaly::get_by_id))
        .route("/{inspection_number}", get(anomaly::list_by_inspection))
}
