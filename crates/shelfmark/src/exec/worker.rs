//! Database worker thread management.
//!
//! Each worker runs in a dedicated OS thread and owns a single
//! `rusqlite::Connection`, which is `Send` but not `Sync` and therefore
//! never shared: a job gets exclusive access to the connection for its
//! whole transaction.

use rusqlite::Connection;
use tokio::sync::mpsc;

/// A unit of blocking work executed against the worker's connection.
///
/// The closure is responsible for sending its result back through
/// whatever channel it captured; the worker runs it exactly once and does
/// not look at the outcome.
pub(crate) type Job = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

/// A dedicated database worker thread.
pub(crate) struct DbWorker {
    job_tx: mpsc::Sender<Job>,
}

impl DbWorker {
    /// Spawn a worker thread that owns `conn`.
    ///
    /// The channel is bounded at `queue_depth`: submissions past that queue
    /// at the sender until the worker catches up. The thread exits when the
    /// last sender is dropped.
    pub(crate) fn spawn(mut conn: Connection, queue_depth: usize) -> Self {
        let (job_tx, mut job_rx) = mpsc::channel::<Job>(queue_depth);

        std::thread::spawn(move || {
            tracing::debug!("database worker started");

            while let Some(job) = job_rx.blocking_recv() {
                job(&mut conn);
            }

            tracing::debug!("database worker shutting down");
        });

        Self { job_tx }
    }

    /// Get a handle to the worker's job queue.
    pub(crate) fn sender(&self) -> &mpsc::Sender<Job> {
        &self.job_tx
    }
}
