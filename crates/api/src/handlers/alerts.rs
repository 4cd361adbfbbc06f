//! Handlers for the alert pipeline endpoints.
//!
//! `ingest_reading` is the ingestion orchestrator: it runs one reading
//! through evaluate -> store -> notification gating -> dispatch. The other
//! handlers are thin wrappers over the repositories.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use vigil_core::alert::Severity;
use vigil_core::error::CoreError;
use vigil_core::thresholds::{evaluate, Breach, ReadingMetrics};
use vigil_core::types::Timestamp;
use vigil_core::validation::validate_email_address;
use vigil_db::models::alert::{AlertRecord, CreateAlert};
use vigil_db::models::notification_config::NotificationConfig;
use vigil_db::repositories::{AlertRepo, CooldownRepo, NotificationConfigRepo};
use vigil_notify::OutboundEmail;

use crate::error::AppResult;
use crate::state::AppState;

/// History page size when the caller does not pass `limit`.
const DEFAULT_HISTORY_LIMIT: i64 = 10;

const REASON_NO_BREACH: &str = "No threshold breached";
const REASON_EMAIL_DISABLED: &str = "Email disabled";
const REASON_CONFIG_MISSING: &str = "Email config not set";
const REASON_COOLDOWN: &str = "Cooldown active";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for the ingestion endpoint.
#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    /// Caller-supplied dedup key; must be stable across client retries.
    pub reading_id: String,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    /// When the reading was taken; server time is used when absent.
    #[serde(default)]
    pub observed_at: Option<Timestamp>,
    /// Whether the caller requests an operator notification.
    #[serde(default)]
    pub notify: bool,
}

/// Response body for the ingestion endpoint.
///
/// `stored`/`sent` are always present; the rest depends on how far the
/// pipeline ran.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub stored: bool,
    pub sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooldown_remaining_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_id: Option<String>,
}

impl IngestResponse {
    /// Reading within thresholds: nothing stored, nothing sent.
    fn no_breach() -> Self {
        Self {
            stored: false,
            sent: false,
            severity: None,
            reason: Some(REASON_NO_BREACH),
            created_at: None,
            cooldown_remaining_ms: None,
            recipients: None,
            delivery_id: None,
        }
    }

    /// Alert stored but notification skipped for `reason`.
    fn stored_unsent(severity: Severity, created_at: Timestamp, reason: &'static str) -> Self {
        Self {
            stored: true,
            sent: false,
            severity: Some(severity),
            reason: Some(reason),
            created_at: Some(created_at),
            cooldown_remaining_ms: None,
            recipients: None,
            delivery_id: None,
        }
    }

    /// Alert stored and notification delivered.
    fn dispatched(
        severity: Severity,
        created_at: Timestamp,
        recipients: Vec<String>,
        delivery_id: String,
    ) -> Self {
        Self {
            stored: true,
            sent: true,
            severity: Some(severity),
            reason: None,
            created_at: Some(created_at),
            cooldown_remaining_ms: None,
            recipients: Some(recipients),
            delivery_id: Some(delivery_id),
        }
    }
}

/// Request body for setting the notification config.
#[derive(Debug, Deserialize)]
pub struct SetConfigRequest {
    pub sender: String,
    pub recipients: Vec<String>,
}

/// Response for both config endpoints.
#[derive(Debug, Serialize)]
pub struct ConfigStatus {
    pub has_config: bool,
}

/// Query parameters for the history endpoint.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// Response body for the history endpoint, newest first.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub alerts: Vec<AlertRecord>,
}

/// Response body for the reset endpoint.
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    /// Number of alert rows deleted.
    pub cleared: u64,
}

// ---------------------------------------------------------------------------
// Ingestion orchestrator
// ---------------------------------------------------------------------------

/// POST /alerts/ingest
///
/// Run one reading through the pipeline. Every breach is stored (idempotent
/// on `reading_id`); a notification is attempted only when the caller asked
/// for one, a usable config exists, and the cooldown gate is acquired -- in
/// that order. The gate is released again if the dispatch fails, so a failed
/// send never burns the cooldown window.
pub async fn ingest_reading(
    State(state): State<AppState>,
    Json(req): Json<IngestRequest>,
) -> AppResult<Json<IngestResponse>> {
    let reading_id = req.reading_id.trim();
    if reading_id.is_empty() {
        return Err(CoreError::Validation("reading_id must not be empty".to_string()).into());
    }

    let metrics = ReadingMetrics {
        temperature: req.temperature,
        humidity: req.humidity,
        pressure: req.pressure,
    };
    let Some(breach) = evaluate(&metrics) else {
        tracing::debug!(reading_id, "Reading within thresholds");
        return Ok(Json(IngestResponse::no_breach()));
    };

    let created_at = req.observed_at.unwrap_or_else(Utc::now);
    let alert = CreateAlert {
        reading_id: reading_id.to_string(),
        created_at,
        severity: breach.severity,
        temperature: metrics.temperature,
        humidity: metrics.humidity,
        pressure: metrics.pressure,
        message: breach.message.clone(),
    };
    let created = AlertRepo::insert_if_absent(&state.pool, &alert).await?;
    if !created {
        tracing::debug!(reading_id, "Alert already stored for this reading");
    }

    if !req.notify {
        return Ok(Json(IngestResponse::stored_unsent(
            breach.severity,
            created_at,
            REASON_EMAIL_DISABLED,
        )));
    }

    let config = NotificationConfigRepo::get(&state.pool).await?;
    let Some(config) = config.filter(|c| c.is_usable()) else {
        return Ok(Json(IngestResponse::stored_unsent(
            breach.severity,
            created_at,
            REASON_CONFIG_MISSING,
        )));
    };

    let now = Utc::now();
    let window = state.config.cooldown_window();
    let Some(previous) = CooldownRepo::try_acquire(&state.pool, now, window).await? else {
        let last = CooldownRepo::last_dispatched_at(&state.pool).await?;
        let remaining = (window - (now - last)).num_milliseconds().max(0);
        let mut response =
            IngestResponse::stored_unsent(breach.severity, created_at, REASON_COOLDOWN);
        response.cooldown_remaining_ms = Some(remaining);
        return Ok(Json(response));
    };

    let email = build_alert_email(&config, &breach, &metrics, created_at);
    match state.dispatcher.dispatch(&email).await {
        Ok(receipt) => {
            tracing::info!(
                reading_id,
                severity = %breach.severity,
                delivery_id = %receipt.delivery_id,
                "Alert notification dispatched"
            );
            Ok(Json(IngestResponse::dispatched(
                breach.severity,
                created_at,
                config.recipients,
                receipt.delivery_id,
            )))
        }
        Err(err) => {
            // A failed send must not consume the cooldown window; the stored
            // alert is kept either way.
            if let Err(release_err) = CooldownRepo::release(&state.pool, now, previous).await {
                tracing::error!(
                    error = %release_err,
                    "Failed to release cooldown after dispatch failure"
                );
            }
            tracing::warn!(reading_id, error = %err, "Alert notification failed");
            Err(err.into())
        }
    }
}

/// Assemble the operator notification for a breaching reading.
fn build_alert_email(
    config: &NotificationConfig,
    breach: &Breach,
    metrics: &ReadingMetrics,
    created_at: Timestamp,
) -> OutboundEmail {
    let subject = format!(
        "[{}] Environment alert ({})",
        breach.severity,
        created_at.to_rfc3339()
    );
    let body = format!(
        "Severity: {}\n\
         Time: {}\n\
         \n\
         Triggered conditions:\n\
         - {}\n\
         \n\
         Current readings:\n\
         Temperature: {}°C\n\
         Humidity: {}%\n\
         Pressure: {} hPa\n",
        breach.severity,
        created_at.to_rfc3339(),
        breach.triggers.join("\n- "),
        metrics.temperature,
        metrics.humidity,
        metrics.pressure,
    );
    OutboundEmail {
        from: config.sender.clone(),
        to: config.recipients.clone(),
        subject,
        body,
        reply_to: None,
    }
}

// ---------------------------------------------------------------------------
// Config handlers
// ---------------------------------------------------------------------------

/// GET /alerts/config
pub async fn get_config(State(state): State<AppState>) -> AppResult<Json<ConfigStatus>> {
    let config = NotificationConfigRepo::get(&state.pool).await?;
    let has_config = config.is_some_and(|c| c.is_usable());
    Ok(Json(ConfigStatus { has_config }))
}

/// POST /alerts/config
///
/// Validates address shape before anything is written; a rejected request
/// leaves the existing config untouched.
pub async fn set_config(
    State(state): State<AppState>,
    Json(req): Json<SetConfigRequest>,
) -> AppResult<Json<ConfigStatus>> {
    let sender = req.sender.trim().to_string();
    let recipients: Vec<String> = req
        .recipients
        .iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect();

    if sender.is_empty() || recipients.is_empty() {
        return Err(CoreError::Validation(
            "sender and at least one recipient are required".to_string(),
        )
        .into());
    }
    validate_email_address(&sender, "sender")?;
    for recipient in &recipients {
        validate_email_address(recipient, "recipient")?;
    }

    NotificationConfigRepo::upsert(&state.pool, &sender, &recipients).await?;
    tracing::info!(recipient_count = recipients.len(), "Notification config updated");
    Ok(Json(ConfigStatus { has_config: true }))
}

// ---------------------------------------------------------------------------
// History / reset handlers
// ---------------------------------------------------------------------------

/// GET /alerts/history
///
/// The only read path the presentation layer may use; a thin pass-through to
/// the store.
pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<HistoryResponse>> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let alerts = AlertRepo::list(&state.pool, limit).await?;
    Ok(Json(HistoryResponse { alerts }))
}

/// POST /alerts/reset
///
/// Clears stored alerts and reopens the cooldown gate in one transaction, so
/// a partial reset cannot leave the throttle suppressing freshly reseeded
/// alerts.
pub async fn reset(State(state): State<AppState>) -> AppResult<Json<ResetResponse>> {
    let mut tx = state.pool.begin().await?;
    let cleared = AlertRepo::clear(&mut *tx).await?;
    CooldownRepo::reset(&mut *tx).await?;
    tx.commit().await?;

    tracing::info!(cleared, "Alert history cleared and cooldown reset");
    Ok(Json(ResetResponse { cleared }))
}
