//! Route definitions for inspections and their images.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{inspection, inspection_image};
use crate::state::AppState;

/// Routes mounted at `/inspections`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// GET    /{id}/images      -> list_images
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(inspection::list).post(inspection::create))
        .route("/{id}", get(inspection::get_by_id))
        .route("/{id}/images", get(inspection::list_images))
}

/// Image routes, merged at the `/api` level.
///
/// ```text
/// POST   /images           -> upload
/// GET    /images/{id}      -> get_file
/// ```
pub fn image_router() -> Router<AppState> {
    Router::new()
        .route("/images", post(inspection_image::upload))
        .route("/images/{id}", get(inspection_image::get_file))
}
