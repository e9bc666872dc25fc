//! Transactional unit.
//!
//! Wraps caller-supplied logic in a SQLite transaction with commit on
//! success and rollback on every other exit path. `rusqlite::Transaction`
//! rolls back when dropped without a commit, so an early `?` return or a
//! panic unwinding through the worker both leave the store untouched. The
//! connection itself is owned by the worker thread and is never released
//! anywhere else, so it cannot leak.
//!
//! There is no retry logic here: one failed attempt is terminal for that
//! operation.

use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Runs `work` inside a deferred transaction. Intended for reads.
pub(crate) fn with_transaction<T, E, F>(conn: &mut Connection, work: F) -> Result<T, E>
where
    E: From<rusqlite::Error>,
    F: FnOnce(&Transaction<'_>) -> Result<T, E>,
{
    run(conn, TransactionBehavior::Deferred, work)
}

/// Runs `work` inside an immediate transaction.
///
/// Writes take the write lock up front, so two workers updating the same
/// rows serialize at BEGIN instead of deadlocking on a lock upgrade.
pub(crate) fn with_immediate_transaction<T, E, F>(conn: &mut Connection, work: F) -> Result<T, E>
where
    E: From<rusqlite::Error>,
    F: FnOnce(&Transaction<'_>) -> Result<T, E>,
{
    run(conn, TransactionBehavior::Immediate, work)
}

fn run<T, E, F>(conn: &mut Connection, behavior: TransactionBehavior, work: F) -> Result<T, E>
where
    E: From<rusqlite::Error>,
    F: FnOnce(&Transaction<'_>) -> Result<T, E>,
{
    let tx = conn.transaction_with_behavior(behavior)?;
    // On Err the transaction is dropped here uncommitted, which rolls back.
    let value = work(&tx)?;
    tx.commit()?;
    Ok(value)
}
