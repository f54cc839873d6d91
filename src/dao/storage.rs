use std::error::Error;
use thiserror::Error;

use crate::dao::models::RecordId;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or opened.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// What the backend was doing when it became unreachable.
        message: String,
        /// Backend-specific cause.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The backend was reachable but rejected a statement.
    #[error("storage query failed: {message}")]
    Query {
        /// Which statement failed.
        message: String,
        /// Backend-specific cause.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A snapshot field could not be serialized before storage.
    #[error("failed to encode field `{field}`")]
    Encode {
        /// Wire name of the offending field.
        field: &'static str,
        /// Serializer failure.
        #[source]
        source: serde_json::Error,
    },
    /// A stored column does not hold valid JSON text.
    #[error("stored field `{field}` of record {id} is not valid JSON")]
    Corrupted {
        /// Record holding the bad column.
        id: RecordId,
        /// Wire name of the bad column.
        field: &'static str,
        /// Parser failure.
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct a query error from a failed statement.
    pub fn query(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Query {
            message,
            source: Box::new(source),
        }
    }

    /// Whether the failure means the backend itself is unreachable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::Unavailable { .. })
    }
}
