//! Error types shared by the SQLite storage implementation.

use thiserror::Error;

/// Convenient result alias returning [`SqliteDaoError`] failures.
pub type SqliteResult<T> = Result<T, SqliteDaoError>;

/// Failures that can occur while interacting with SQLite.
#[derive(Debug, Error)]
pub enum SqliteDaoError {
    /// The database URL points at an in-memory database.
    #[error("in-memory SQLite databases are not supported: `{url}`")]
    InMemoryUnsupported {
        /// URL as configured.
        url: String,
    },
    /// The database URL does not name a file.
    #[error("database URL `{url}` does not name a file")]
    EmptyPath {
        /// URL as configured.
        url: String,
    },
    /// Opening (or configuring) a connection failed.
    #[error("failed to open SQLite database `{path}`")]
    Open {
        /// Database file.
        path: String,
        /// SQLite failure.
        #[source]
        source: rusqlite::Error,
    },
    /// Creating the game state table failed.
    #[error("failed to apply game state schema to `{path}`")]
    Schema {
        /// Database file.
        path: String,
        /// SQLite failure.
        #[source]
        source: rusqlite::Error,
    },
    /// Inserting a snapshot failed.
    #[error("failed to insert game state")]
    Insert {
        /// SQLite failure.
        #[source]
        source: rusqlite::Error,
    },
    /// Reading the latest snapshot failed.
    #[error("failed to query latest game state")]
    QueryLatest {
        /// SQLite failure.
        #[source]
        source: rusqlite::Error,
    },
    /// Counting stored snapshots failed.
    #[error("failed to count game states")]
    Count {
        /// SQLite failure.
        #[source]
        source: rusqlite::Error,
    },
    /// The liveness probe failed.
    #[error("SQLite health check failed for `{path}`")]
    HealthCheck {
        /// Database file.
        path: String,
        /// SQLite failure.
        #[source]
        source: rusqlite::Error,
    },
    /// The blocking worker running the statement panicked or was cancelled.
    #[error("SQLite worker task failed")]
    Worker {
        /// Join failure from the blocking pool.
        #[source]
        source: tokio::task::JoinError,
    },
}

impl SqliteDaoError {
    /// Whether the error means the database cannot be reached at all, as opposed to
    /// a single statement failing.
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            SqliteDaoError::InMemoryUnsupported { .. }
                | SqliteDaoError::EmptyPath { .. }
                | SqliteDaoError::Open { .. }
                | SqliteDaoError::Schema { .. }
                | SqliteDaoError::HealthCheck { .. }
                | SqliteDaoError::Worker { .. }
        )
    }
}
