use std::{path::PathBuf, time::Duration};

use super::error::{SqliteDaoError, SqliteResult};

/// How long a connection waits on a locked database before giving up.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Runtime configuration describing which SQLite file backs the store.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Database file, created on first connect.
    pub path: PathBuf,
    /// Wait applied when another connection holds the write lock.
    pub busy_timeout: Duration,
}

impl SqliteConfig {
    /// Construct a configuration for an explicit database file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Override the busy timeout applied to every connection.
    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    /// Build a configuration from a database URL.
    ///
    /// Accepts `sqlite:///relative.db`, `sqlite:////absolute.db`, `sqlite://path`,
    /// `sqlite:path` and bare file paths. In-memory databases are rejected because
    /// every operation opens its own connection.
    pub fn from_url(url: &str) -> SqliteResult<Self> {
        let trimmed = url.trim();
        let path = trimmed
            .strip_prefix("sqlite:///")
            .or_else(|| trimmed.strip_prefix("sqlite://"))
            .or_else(|| trimmed.strip_prefix("sqlite:"))
            .unwrap_or(trimmed);

        if path.is_empty() {
            return Err(SqliteDaoError::EmptyPath { url: url.into() });
        }
        if path == ":memory:" || path.starts_with("file::memory:") || path.contains("mode=memory")
        {
            return Err(SqliteDaoError::InMemoryUnsupported { url: url.into() });
        }

        Ok(Self::new(path))
    }
}
