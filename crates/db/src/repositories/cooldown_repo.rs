//! Repository for the singleton `cooldown_state` row.
//!
//! The cooldown gate is the pipeline's central concurrency invariant: under
//! N simultaneous acquisition attempts within one window, exactly one may
//! succeed. Every mutation here is a single conditional statement against
//! the shared row, never a read followed by a separate write, so the
//! guarantee holds across service instances.

use chrono::{DateTime, Duration, Utc};
use sqlx::{PgExecutor, PgPool};
use vigil_core::types::Timestamp;

/// Provides atomic operations on the cooldown gate.
pub struct CooldownRepo;

impl CooldownRepo {
    /// Attempt to acquire the cooldown gate at `now`.
    ///
    /// Atomically: if `now - last_dispatched_at >= window`, set
    /// `last_dispatched_at = now` and return the previous value; otherwise
    /// leave the row untouched and return `None`. The returned timestamp is
    /// the token needed to [`release`](Self::release) the reservation if the
    /// dispatch it guards ends up failing.
    pub async fn try_acquire(
        pool: &PgPool,
        now: Timestamp,
        window: Duration,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        let cutoff = now - window;
        sqlx::query_scalar(
            "WITH prev AS (\
                 SELECT last_dispatched_at FROM cooldown_state WHERE id = 1 FOR UPDATE\
             ) \
             UPDATE cooldown_state AS c \
             SET last_dispatched_at = $1 \
             FROM prev \
             WHERE c.id = 1 AND prev.last_dispatched_at <= $2 \
             RETURNING prev.last_dispatched_at",
        )
        .bind(now)
        .bind(cutoff)
        .fetch_optional(pool)
        .await
    }

    /// Roll back a reservation after a failed dispatch.
    ///
    /// Restores `previous` only while the row still holds our `acquired_at`
    /// value, so a later acquisition by another instance is never clobbered.
    /// Returns `true` if the rollback applied.
    pub async fn release(
        pool: &PgPool,
        acquired_at: Timestamp,
        previous: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cooldown_state \
             SET last_dispatched_at = $2 \
             WHERE id = 1 AND last_dispatched_at = $1",
        )
        .bind(acquired_at)
        .bind(previous)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Read the current gate timestamp (throttle reporting).
    pub async fn last_dispatched_at(pool: &PgPool) -> Result<Timestamp, sqlx::Error> {
        sqlx::query_scalar("SELECT last_dispatched_at FROM cooldown_state WHERE id = 1")
            .fetch_one(pool)
            .await
    }

    /// Administrative reset: back to the epoch, immediately notifiable.
    ///
    /// Takes any executor so the reset endpoint can pair it with a history
    /// clear inside one transaction.
    pub async fn reset<'e>(executor: impl PgExecutor<'e>) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE cooldown_state SET last_dispatched_at = $1 WHERE id = 1")
            .bind(DateTime::<Utc>::UNIX_EPOCH)
            .execute(executor)
            .await?;
        Ok(())
    }
}
