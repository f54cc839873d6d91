#![allow(dead_code)]

use std::{
    env,
    path::{Path, PathBuf},
    sync::Arc,
};

use shattered_realms_back::{
    dao::{
        game_state::GameStateRepository,
        game_state_store::{
            GameStateStore,
            sqlite::{SqliteConfig, SqliteGameStateStore},
        },
    },
    state::{AppState, SharedState},
};
use uuid::Uuid;

/// SQLite file in the system temp directory, removed (with its WAL files) on drop.
pub struct TestDatabase {
    path: PathBuf,
}

impl TestDatabase {
    pub fn new() -> Self {
        let path = env::temp_dir().join(format!("shattered-realms-test-{}.db", Uuid::new_v4()));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn store(&self) -> Arc<dyn GameStateStore> {
        let store = SqliteGameStateStore::connect(SqliteConfig::new(&self.path))
            .await
            .expect("open test database");
        Arc::new(store)
    }

    pub async fn repository(&self) -> GameStateRepository {
        GameStateRepository::new(self.store().await)
    }

    pub async fn app_state(&self) -> SharedState {
        let state = AppState::new();
        state.set_game_store(self.store().await).await;
        state
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}
