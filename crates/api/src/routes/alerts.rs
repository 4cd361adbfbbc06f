//! Route definitions for the alert pipeline endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::alerts;
use crate::state::AppState;

/// Alert routes mounted at `/alerts`.
///
/// ```text
/// POST /ingest   -> ingest_reading
/// GET  /config   -> get_config
/// POST /config   -> set_config
/// GET  /history  -> history
/// POST /reset    -> reset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ingest", post(alerts::ingest_reading))
        .route("/config", get(alerts::get_config).post(alerts::set_config))
        .route("/history", get(alerts::history))
        .route("/reset", post(alerts::reset))
}
