//! Connection pool for Diesel SQLite connections.
//!
//! Wraps diesel's `r2d2` integration behind a small configuration type.
//! SQLite connections are synchronous; callers that run inside an async
//! task must hop to a blocking thread before touching a connection (the
//! repository does this via `spawn_blocking`).

use std::time::Duration;

use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Configuration for the database connection pool.
///
/// # Example
///
/// ```ignore
/// let config = PoolConfig::new("users.db")
///     .with_max_size(4)
///     .with_connection_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_path: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Create a new configuration for the given SQLite database file.
    ///
    /// Defaults: `max_size` 8 connections, `connection_timeout` 30s.
    pub fn new(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            max_size: 8,
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Set the maximum number of connections in the pool.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the connection checkout timeout.
    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Get the database file path.
    pub fn database_path(&self) -> &str {
        &self.database_path
    }
}

/// Shared connection pool for SQLite via Diesel.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<ConnectionManager<SqliteConnection>>,
}

impl DbPool {
    /// Create a new connection pool with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` when the pool cannot be constructed,
    /// e.g. the database file is not creatable.
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = ConnectionManager::<SqliteConnection>::new(config.database_path());
        let inner = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .map_err(|err| PoolError::build(err.to_string()))?;
        Ok(Self { inner })
    }

    /// Get a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Checkout` when no connection becomes
    /// available within the configured timeout.
    pub fn get(
        &self,
    ) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>, PoolError> {
        self.inner
            .get()
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_config_default_values() {
        let config = PoolConfig::new("users.db");

        assert_eq!(config.database_path(), "users.db");
        assert_eq!(config.max_size, 8);
        assert_eq!(config.connection_timeout, Duration::from_secs(30));
    }

    #[rstest]
    fn pool_config_builder_pattern() {
        let config = PoolConfig::new("users.db")
            .with_max_size(2)
            .with_connection_timeout(Duration::from_secs(5));

        assert_eq!(config.max_size, 2);
        assert_eq!(config.connection_timeout, Duration::from_secs(5));
    }

    #[rstest]
    fn pool_error_display() {
        let checkout_err = PoolError::checkout("timed out");
        let build_err = PoolError::build("bad path");

        assert!(checkout_err.to_string().contains("timed out"));
        assert!(build_err.to_string().contains("bad path"));
    }
}
