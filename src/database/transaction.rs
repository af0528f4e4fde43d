use crate::booking::BookingError;
use diesel::SqliteConnection;
use std::time::Instant;
use tracing::debug;

/// Runs `f` inside a `BEGIN IMMEDIATE` transaction.
///
/// SQLite hands out the database write lock when the transaction begins, so
/// every read inside `f` sees state no other writer can change before commit.
/// Waiting for that lock is bounded by the connection's `busy_timeout`; on
/// expiry the begin fails with "database is locked" and `f` never runs.
///
/// Commits when `f` returns `Ok` and rolls back when it returns `Err`. If the
/// rollback itself fails, diesel marks the connection broken and the pool
/// discards it instead of handing it out again.
pub fn write_transaction<T, F>(
    conn: &mut SqliteConnection,
    label: &'static str,
    f: F,
) -> Result<T, BookingError>
where
    F: FnOnce(&mut SqliteConnection) -> Result<T, BookingError>,
{
    let started = Instant::now();
    let result = conn.immediate_transaction(f);
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => debug!(label, elapsed_ms, "transaction committed"),
        Err(err) => debug!(label, elapsed_ms, error = %err, "transaction rolled back"),
    }
    result
}
