//! Database execution context.
//!
//! Blocking SQLite calls run on a dedicated pool of worker threads so they
//! never consume the caller's async runtime threads. Each worker owns one
//! connection, which makes the worker count and the connection count the
//! same number by construction: at most `workers` blocking database calls
//! are ever in flight, and excess submissions queue on a bounded channel.

mod error;
mod pool;
mod worker;

pub use error::ExecError;
pub use pool::{Pool, PoolConfig};
