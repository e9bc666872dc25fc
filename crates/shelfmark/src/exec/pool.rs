//! Bounded pool of database workers.
//!
//! The pool distributes jobs across its workers round-robin and delivers
//! each result through a oneshot channel. Awaiting that channel resumes
//! the caller on its own runtime, so continuations chained onto a
//! repository call run in the caller's context, not on a worker thread.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rusqlite::Connection;
use tokio::sync::oneshot;

use super::error::{ExecError, Result};
use super::worker::{DbWorker, Job};

/// Sizing and deadline knobs for the pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Worker threads to spawn; one connection each.
    pub workers: usize,
    /// Pending submissions allowed per worker before senders wait.
    pub queue_depth: usize,
    /// Deadline for a submitted operation in milliseconds.
    pub op_timeout_ms: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            queue_depth: 32,
            op_timeout_ms: 5_000,
        }
    }
}

/// A pool of worker threads for blocking database access.
pub struct Pool {
    workers: Vec<DbWorker>,
    next_worker: AtomicUsize,
    op_timeout: Duration,
    op_timeout_ms: u64,
}

impl Pool {
    /// Create a pool, opening one connection per worker via `connect`.
    ///
    /// Connections are opened on the calling thread so that a bad database
    /// path fails here rather than inside a worker. `workers` and
    /// `queue_depth` are clamped to at least 1.
    pub fn new<C>(config: PoolConfig, mut connect: C) -> rusqlite::Result<Self>
    where
        C: FnMut() -> rusqlite::Result<Connection>,
    {
        let worker_count = config.workers.max(1);
        let queue_depth = config.queue_depth.max(1);

        let mut workers = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let conn = connect()?;
            workers.push(DbWorker::spawn(conn, queue_depth));
        }

        tracing::info!(
            worker_count,
            queue_depth,
            op_timeout_ms = config.op_timeout_ms,
            "database pool initialized"
        );

        Ok(Self {
            workers,
            next_worker: AtomicUsize::new(0),
            op_timeout: Duration::from_millis(config.op_timeout_ms),
            op_timeout_ms: config.op_timeout_ms,
        })
    }

    /// Number of workers (and therefore connections) in the pool.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Run `work` on a worker thread and await its result.
    ///
    /// `work` executes exactly once, with exclusive access to one of the
    /// pool's connections. Faults must be reported through the returned
    /// value (`T` is typically a `Result`); the pool itself only fails
    /// when the worker is unreachable or the deadline expires.
    pub async fn call<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> T + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        let job: Job = Box::new(move |conn: &mut Connection| {
            // The receiver may have given up on the deadline; the work has
            // already run, so the lost reply is dropped.
            let _ = reply_tx.send(work(conn));
        });

        // Round-robin worker selection
        let worker_idx = self.next_worker.fetch_add(1, Ordering::Relaxed) % self.workers.len();
        let worker = &self.workers[worker_idx];

        // A full queue makes this send wait, which is the backpressure
        // bound on total outstanding submissions.
        worker
            .sender()
            .send(job)
            .await
            .map_err(|_| ExecError::ChannelClosed)?;

        match tokio::time::timeout(self.op_timeout, reply_rx).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(ExecError::ChannelClosed),
            Err(_) => Err(ExecError::Timeout(self.op_timeout_ms)),
        }
    }
}
