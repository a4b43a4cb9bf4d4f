//! Shared response envelope types for API handlers.
//!
//! CRUD responses use a `{ "data": ... }` envelope. The ML and thermal
//! endpoints are the exception: they answer with
//! [`PredictionResponse`](thermoscan_core::prediction::PredictionResponse)
//! directly, see [`crate::thermal`].

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
