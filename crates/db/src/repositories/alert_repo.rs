//! Repository for the `alerts` table.

use sqlx::{PgExecutor, PgPool};

use crate::models::alert::{AlertRecord, CreateAlert};

/// Column list for `alerts` queries.
const COLUMNS: &str =
    "id, reading_id, created_at, severity, temperature, humidity, pressure, message";

/// Largest number of rows a history query may return.
pub const MAX_HISTORY_LIMIT: i64 = 100;

/// Provides operations for stored alerts.
pub struct AlertRepo;

impl AlertRepo {
    /// Insert an alert unless one already exists for the same `reading_id`.
    ///
    /// Returns `true` if a row was created, `false` if an alert for that
    /// reading was already present. Uniqueness is enforced by the
    /// `uq_alerts_reading_id` constraint, so two concurrent calls with the
    /// same key produce exactly one `true` between them. The duplicate case
    /// is the expected idempotent outcome, not an error.
    pub async fn insert_if_absent(pool: &PgPool, alert: &CreateAlert) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO alerts \
               (reading_id, created_at, severity, temperature, humidity, pressure, message) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (reading_id) DO NOTHING",
        )
        .bind(&alert.reading_id)
        .bind(alert.created_at)
        .bind(alert.severity.as_str())
        .bind(alert.temperature)
        .bind(alert.humidity)
        .bind(alert.pressure)
        .bind(&alert.message)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List stored alerts, newest first.
    ///
    /// `limit` is clamped to `[1, 100]` here so no caller can bypass the cap.
    pub async fn list(pool: &PgPool, limit: i64) -> Result<Vec<AlertRecord>, sqlx::Error> {
        let limit = limit.clamp(1, MAX_HISTORY_LIMIT);
        let query =
            format!("SELECT {COLUMNS} FROM alerts ORDER BY created_at DESC, id DESC LIMIT $1");
        sqlx::query_as::<_, AlertRecord>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Delete all stored alerts (administrative reset path).
    ///
    /// Takes any executor so the reset endpoint can pair it with a cooldown
    /// reset inside one transaction. Returns the number of deleted rows.
    pub async fn clear<'e>(executor: impl PgExecutor<'e>) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM alerts").execute(executor).await?;
        Ok(result.rows_affected())
    }
}
