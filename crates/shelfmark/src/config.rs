use std::env;

use crate::exec::PoolConfig;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "shelfmark.db")
    pub db_path: String,
    /// Number of database worker threads, one connection each (default: 4)
    pub db_pool_size: usize,
    /// Queued submissions allowed per worker before senders wait (default: 32)
    pub db_queue_depth: usize,
    /// Deadline for a submitted operation in milliseconds (default: 5,000)
    pub db_op_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SHELFMARK_DB_PATH` - SQLite database path (default: "shelfmark.db")
    /// - `DB_POOL_SIZE` - Worker/connection count (default: 4)
    /// - `DB_QUEUE_DEPTH` - Pending submissions per worker (default: 32)
    /// - `DB_OP_TIMEOUT_MS` - Operation deadline in ms (default: 5,000)
    pub fn from_env() -> Self {
        Self {
            db_path: env::var("SHELFMARK_DB_PATH").unwrap_or_else(|_| "shelfmark.db".to_string()),
            db_pool_size: env::var("DB_POOL_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4),
            db_queue_depth: env::var("DB_QUEUE_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(32),
            db_op_timeout_ms: env::var("DB_OP_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5_000),
        }
    }

    /// Pool configuration derived from the database settings.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            workers: self.db_pool_size,
            queue_depth: self.db_queue_depth,
            op_timeout_ms: self.db_op_timeout_ms,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_config_conversion() {
        let config = Config {
            db_path: "test.db".to_string(),
            db_pool_size: 2,
            db_queue_depth: 8,
            db_op_timeout_ms: 250,
        };

        let pool = config.pool_config();
        assert_eq!(pool.workers, 2);
        assert_eq!(pool.queue_depth, 8);
        assert_eq!(pool.op_timeout_ms, 250);
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("SHELFMARK_DB_PATH");
        env::remove_var("DB_POOL_SIZE");
        env::remove_var("DB_QUEUE_DEPTH");
        env::remove_var("DB_OP_TIMEOUT_MS");

        let config = Config::from_env();

        assert_eq!(config.db_path, "shelfmark.db");
        assert_eq!(config.db_pool_size, 4);
        assert_eq!(config.db_queue_depth, 32);
        assert_eq!(config.db_op_timeout_ms, 5_000);
    }
}
