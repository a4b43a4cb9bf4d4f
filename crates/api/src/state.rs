use std::sync::Arc;

use thermoscan_core::storage::UploadStore;

use crate::config::ServerConfig;
use crate::thermal::ThermalService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: thermoscan_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Where uploaded inspection images are kept.
    pub uploads: UploadStore,
    /// Thermal comparison entry point, shared by the ML and thermal routes.
    pub thermal: Arc<ThermalService>,
}
