use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use thermoscan_core::thermal::locate::locate_script;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether the analysis script resolves under the configured dirs.
    /// A missing script only affects the thermal routes, so it does not
    /// change `status`.
    pub analysis_script_found: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = thermoscan_db::health_check(&state.pool).await.is_ok();
    let analysis = &state.config.analysis;
    let analysis_script_found =
        locate_script(&analysis.base_dir, &analysis.script_dirs, &analysis.script_name).is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        analysis_script_found,
    })
}

/// Mounted at the root, outside `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
