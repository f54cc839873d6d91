mod config;
mod error;
mod store;

pub use config::{DEFAULT_BUSY_TIMEOUT, SqliteConfig};
pub use error::{SqliteDaoError, SqliteResult};
pub use store::SqliteGameStateStore;

use crate::dao::storage::StorageError;

impl From<SqliteDaoError> for StorageError {
    fn from(err: SqliteDaoError) -> Self {
        if err.is_connection_failure() {
            StorageError::unavailable(err.to_string(), err)
        } else {
            StorageError::query(err.to_string(), err)
        }
    }
}
