//! Integration tests for the atomic cooldown gate.

use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::PgPool;
use vigil_db::repositories::CooldownRepo;

/// The 5-minute production default, used here for readability.
fn window() -> Duration {
    Duration::minutes(5)
}

/// A fixed whole-second acquisition time (TIMESTAMPTZ keeps microseconds).
fn t0() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

// ---------------------------------------------------------------------------
// Test: acquisition semantics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn fresh_gate_is_immediately_acquirable(pool: PgPool) {
    let prev = CooldownRepo::try_acquire(&pool, t0(), window())
        .await
        .expect("acquire should succeed");

    // The migration seeds the gate at the epoch.
    assert_eq!(prev, Some(DateTime::<Utc>::UNIX_EPOCH));

    let last = CooldownRepo::last_dispatched_at(&pool)
        .await
        .expect("read should succeed");
    assert_eq!(last, t0());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_acquire_within_window_fails_and_leaves_state(pool: PgPool) {
    CooldownRepo::try_acquire(&pool, t0(), window())
        .await
        .expect("acquire should succeed");

    let attempt = CooldownRepo::try_acquire(&pool, t0() + Duration::minutes(1), window())
        .await
        .expect("acquire should succeed");
    assert_eq!(attempt, None);

    let last = CooldownRepo::last_dispatched_at(&pool)
        .await
        .expect("read should succeed");
    assert_eq!(last, t0(), "a failed acquire must not touch the gate");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn acquire_at_exact_window_boundary_succeeds(pool: PgPool) {
    CooldownRepo::try_acquire(&pool, t0(), window())
        .await
        .expect("acquire should succeed");

    // Elapsed == window is allowed (>=, not >).
    let attempt = CooldownRepo::try_acquire(&pool, t0() + window(), window())
        .await
        .expect("acquire should succeed");
    assert_eq!(attempt, Some(t0()));
}

// ---------------------------------------------------------------------------
// Test: exactly one concurrent acquirer wins
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_acquires_have_one_winner(pool: PgPool) {
    let now = t0();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            CooldownRepo::try_acquire(&pool, now, window()).await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        let outcome = handle
            .await
            .expect("task should not panic")
            .expect("acquire should succeed");
        if outcome.is_some() {
            winners += 1;
        }
    }

    assert_eq!(winners, 1, "exactly one concurrent acquirer may win");
}

// ---------------------------------------------------------------------------
// Test: release rolls back only the caller's own reservation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn release_restores_previous_timestamp(pool: PgPool) {
    let prev = CooldownRepo::try_acquire(&pool, t0(), window())
        .await
        .expect("acquire should succeed")
        .expect("gate should be open");

    let released = CooldownRepo::release(&pool, t0(), prev)
        .await
        .expect("release should succeed");
    assert!(released);

    let last = CooldownRepo::last_dispatched_at(&pool)
        .await
        .expect("read should succeed");
    assert_eq!(last, DateTime::<Utc>::UNIX_EPOCH);

    // The gate is open again: the failed dispatch did not burn the window.
    let reacquired = CooldownRepo::try_acquire(&pool, t0() + Duration::seconds(1), window())
        .await
        .expect("acquire should succeed");
    assert!(reacquired.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn release_is_a_no_op_after_another_acquisition(pool: PgPool) {
    let prev = CooldownRepo::try_acquire(&pool, t0(), window())
        .await
        .expect("acquire should succeed")
        .expect("gate should be open");

    // Someone else acquires after our window elapses...
    let later = t0() + window();
    CooldownRepo::try_acquire(&pool, later, window())
        .await
        .expect("acquire should succeed")
        .expect("gate should be open");

    // ...so our stale rollback must not apply.
    let released = CooldownRepo::release(&pool, t0(), prev)
        .await
        .expect("release should succeed");
    assert!(!released);

    let last = CooldownRepo::last_dispatched_at(&pool)
        .await
        .expect("read should succeed");
    assert_eq!(last, later);
}

// ---------------------------------------------------------------------------
// Test: administrative reset reopens the gate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn reset_returns_gate_to_epoch(pool: PgPool) {
    CooldownRepo::try_acquire(&pool, t0(), window())
        .await
        .expect("acquire should succeed");

    CooldownRepo::reset(&pool).await.expect("reset should succeed");

    let last = CooldownRepo::last_dispatched_at(&pool)
        .await
        .expect("read should succeed");
    assert_eq!(last, DateTime::<Utc>::UNIX_EPOCH);
}
