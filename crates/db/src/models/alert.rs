//! Stored alert entity and insert DTO.

use serde::Serialize;
use sqlx::FromRow;
use vigil_core::alert::Severity;
use vigil_core::types::{DbId, Timestamp};

/// A stored alert, one row per breaching reading.
///
/// Created once on the first successful evaluation of a breaching reading
/// and never mutated; deleted only by the administrative reset.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AlertRecord {
    pub id: DbId,
    /// Caller-supplied dedup key; unique across the table.
    pub reading_id: String,
    pub created_at: Timestamp,
    /// `"WARNING"` or `"CRITICAL"` (CHECK-constrained).
    pub severity: String,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    /// Human-readable list of triggered conditions.
    pub message: String,
}

/// DTO for inserting a new alert row.
#[derive(Debug, Clone)]
pub struct CreateAlert {
    pub reading_id: String,
    pub created_at: Timestamp,
    pub severity: Severity,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub message: String,
}
