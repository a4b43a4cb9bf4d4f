use axum::routing::post;
use axum::Router;

use crate::handlers::ml;
use crate::state::AppState;

/// Routes mounted at `/ml`.
///
/// ```text
/// POST   /predict                -> predict
/// POST   /predict-image/{id}     -> predict_image
/// POST   /predict-upload         -> predict_upload
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/predict", post(ml::predict))
        .route("/predict-image/{id}", post(ml::predict_image))
        .route("/predict-upload", post(ml::predict_upload))
}
