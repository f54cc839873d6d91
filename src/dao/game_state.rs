use std::sync::Arc;

use tracing::debug;

use crate::dao::{
    codec::{decode_state, encode_snapshot},
    game_state_store::GameStateStore,
    models::{GameSnapshot, GameStateRecord, RecordId, StoredGameState},
    storage::StorageResult,
};

/// Data Access Object implementing the save/load contract on top of any
/// [`GameStateStore`] backend.
///
/// Saving always appends a new record; loading always picks the record with the
/// greatest id.
#[derive(Clone)]
pub struct GameStateRepository {
    store: Arc<dyn GameStateStore>,
}

impl GameStateRepository {
    /// Repository over an installed store.
    pub fn new(store: Arc<dyn GameStateStore>) -> Self {
        Self { store }
    }

    /// Serialize the snapshot and append it as a new record.
    pub async fn create_record(&self, snapshot: GameSnapshot) -> StorageResult<RecordId> {
        let encoded = encode_snapshot(&snapshot)?;
        let id = self.store.insert_state(encoded).await?;
        debug!(%id, "appended game state record");
        Ok(id)
    }

    /// Most recent record with every field decoded, or `None` when nothing was saved yet.
    pub async fn get_latest_record(&self) -> StorageResult<Option<GameStateRecord>> {
        self.store
            .latest_state()
            .await?
            .map(decode_state)
            .transpose()
    }

    /// Most recent record with its fields left as the stored JSON text.
    pub async fn get_latest_encoded(&self) -> StorageResult<Option<StoredGameState>> {
        self.store.latest_state().await
    }

    /// Number of records saved so far.
    pub async fn count_records(&self) -> StorageResult<u64> {
        self.store.count_states().await
    }
}
