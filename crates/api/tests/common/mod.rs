//! Shared helpers for the API integration tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use vigil_api::config::ServerConfig;
use vigil_api::router::build_app_router;
use vigil_api::state::AppState;
use vigil_notify::{Dispatcher, EmailTransport, OutboundEmail, TransportError};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses the production cooldown window (5 minutes) so throttle behaviour in
/// tests matches deployment.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        cooldown_secs: 300,
    }
}

// ---------------------------------------------------------------------------
// Recording transport
// ---------------------------------------------------------------------------

/// In-memory [`EmailTransport`] that records every accepted message and can
/// be scripted to fail upcoming sends.
pub struct RecordingTransport {
    sent: Mutex<Vec<OutboundEmail>>,
    failures: Mutex<VecDeque<TransportError>>,
    counter: AtomicUsize,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failures: Mutex::new(VecDeque::new()),
            counter: AtomicUsize::new(0),
        }
    }

    /// Queue a failure for the next send attempt.
    pub fn fail_next(&self, err: TransportError) {
        self.failures.lock().unwrap().push_back(err);
    }

    /// Messages accepted so far.
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailTransport for RecordingTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<String, TransportError> {
        if let Some(err) = self.failures.lock().unwrap().pop_front() {
            return Err(err);
        }
        self.sent.lock().unwrap().push(email.clone());
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(format!("test-delivery-{n}"))
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router with all middleware layers, using the
/// given database pool and a fresh [`RecordingTransport`].
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses. The transport handle is returned so
/// tests can script failures and inspect accepted messages.
pub fn build_test_app(pool: PgPool) -> (Router, Arc<RecordingTransport>) {
    let config = test_config();
    let transport = Arc::new(RecordingTransport::new());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        dispatcher: Arc::new(Dispatcher::new(transport.clone())),
    };

    (build_app_router(state, &config), transport)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Issue a GET request against the app.
pub async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Issue a POST request with a JSON body against the app.
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Issue a bodyless POST request against the app.
pub async fn post_empty(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
