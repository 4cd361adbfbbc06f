pub mod alerts;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /alerts/ingest     submit a reading (POST)
/// /alerts/config     get status, set config (GET, POST)
/// /alerts/history    list stored alerts (GET)
/// /alerts/reset      clear history + cooldown (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/alerts", alerts::router())
}
