/// SQLite file backend.
pub mod sqlite;

use crate::dao::models::{EncodedGameState, RecordId, StoredGameState};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;

/// Abstraction over the append-only persistence of game state snapshots.
pub trait GameStateStore: Send + Sync {
    /// Append a snapshot and return the id SQLite assigned to it.
    fn insert_state(&self, state: EncodedGameState) -> BoxFuture<'static, StorageResult<RecordId>>;
    /// Snapshot with the highest id, if any.
    fn latest_state(&self) -> BoxFuture<'static, StorageResult<Option<StoredGameState>>>;
    /// Number of stored snapshots.
    fn count_states(&self) -> BoxFuture<'static, StorageResult<u64>>;
    /// Cheap liveness probe used by the storage supervisor.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
