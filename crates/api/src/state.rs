use std::sync::Arc;

use vigil_notify::Dispatcher;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vigil_db::DbPool,
    /// Server configuration (cooldown window, timeouts, CORS).
    pub config: Arc<ServerConfig>,
    /// Email dispatcher; the transport behind it is swapped out in tests.
    pub dispatcher: Arc<Dispatcher>,
}
