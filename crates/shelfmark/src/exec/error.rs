use thiserror::Error;

/// Failures of the execution context itself.
///
/// Faults raised by the submitted work are not represented here: the work
/// closure returns its own `Result` through the reply channel, and the
/// pool never interprets it.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The worker is gone: its thread exited or the pool was dropped while
    /// the submission was queued.
    #[error("Worker channel closed")]
    ChannelClosed,

    /// No reply arrived within the configured deadline. The submitted work
    /// is not cancelled; it still runs to completion on the worker.
    #[error("Operation timed out after {0}ms")]
    Timeout(u64),
}

pub type Result<T> = std::result::Result<T, ExecError>;
