use std::{path::PathBuf, sync::Arc, time::Duration};

use futures::future::BoxFuture;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use tracing::info;

use crate::dao::{
    game_state_store::GameStateStore,
    models::{EncodedGameState, RecordId, StoredGameState},
    storage::StorageResult,
};

use super::{
    config::SqliteConfig,
    error::{SqliteDaoError, SqliteResult},
};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS game_state (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    player_position   TEXT NOT NULL,
    inventory         TEXT NOT NULL,
    quest_progress    TEXT NOT NULL,
    faction_standings TEXT NOT NULL,
    echo_crystals     TEXT NOT NULL DEFAULT '[]'
);
";

/// Append-only game state store backed by a single SQLite file.
///
/// Each operation opens its own connection on a blocking thread and runs exactly
/// one statement, so id assignment and atomicity come from SQLite itself.
#[derive(Clone)]
pub struct SqliteGameStateStore {
    path: Arc<PathBuf>,
    busy_timeout: Duration,
}

impl SqliteGameStateStore {
    /// Open the database file, switch it to WAL and make sure the table exists.
    pub async fn connect(config: SqliteConfig) -> SqliteResult<Self> {
        let store = Self {
            path: Arc::new(config.path),
            busy_timeout: config.busy_timeout,
        };

        let schema_store = store.clone();
        run_blocking(move || schema_store.ensure_schema()).await?;

        info!(path = %store.path.display(), "SQLite game state store ready");
        Ok(store)
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&self) -> SqliteResult<Connection> {
        let conn = Connection::open_with_flags(
            self.path.as_path(),
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| SqliteDaoError::Open {
            path: self.display_path(),
            source,
        })?;

        conn.busy_timeout(self.busy_timeout)
            .map_err(|source| SqliteDaoError::Open {
                path: self.display_path(),
                source,
            })?;

        Ok(conn)
    }

    fn ensure_schema(&self) -> SqliteResult<()> {
        let conn = self.open()?;
        let schema_err = |source: rusqlite::Error| SqliteDaoError::Schema {
            path: self.display_path(),
            source,
        };

        // journal_mode answers with the resulting mode, hence the checked variant.
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
            .map_err(schema_err)?;
        conn.execute_batch(SCHEMA).map_err(schema_err)
    }

    fn insert(&self, state: &EncodedGameState) -> SqliteResult<RecordId> {
        let conn = self.open()?;
        conn.query_row(
            "INSERT INTO game_state
                (player_position, inventory, quest_progress, faction_standings, echo_crystals)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id",
            params![
                state.player_position,
                state.inventory,
                state.quest_progress,
                state.faction_standings,
                state.echo_crystals,
            ],
            |row| row.get::<_, i64>(0),
        )
        .map(RecordId::new)
        .map_err(|source| SqliteDaoError::Insert { source })
    }

    fn latest(&self) -> SqliteResult<Option<StoredGameState>> {
        let conn = self.open()?;
        conn.query_row(
            "SELECT id, player_position, inventory, quest_progress, faction_standings, echo_crystals
             FROM game_state
             ORDER BY id DESC
             LIMIT 1",
            [],
            |row| {
                Ok(StoredGameState {
                    id: RecordId::new(row.get(0)?),
                    state: EncodedGameState {
                        player_position: row.get(1)?,
                        inventory: row.get(2)?,
                        quest_progress: row.get(3)?,
                        faction_standings: row.get(4)?,
                        echo_crystals: row.get(5)?,
                    },
                })
            },
        )
        .optional()
        .map_err(|source| SqliteDaoError::QueryLatest { source })
    }

    fn count(&self) -> SqliteResult<u64> {
        let conn = self.open()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM game_state", [], |row| row.get(0))
            .map_err(|source| SqliteDaoError::Count { source })?;
        Ok(count as u64)
    }

    fn ping(&self) -> SqliteResult<()> {
        let conn = self.open()?;
        conn.query_row("SELECT 1 FROM game_state LIMIT 1", [], |_| Ok(()))
            .optional()
            .map(|_| ())
            .map_err(|source| SqliteDaoError::HealthCheck {
                path: self.display_path(),
                source,
            })
    }
}

/// Run a synchronous SQLite operation without stalling the async runtime.
async fn run_blocking<T, F>(work: F) -> SqliteResult<T>
where
    F: FnOnce() -> SqliteResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|source| SqliteDaoError::Worker { source })?
}

impl GameStateStore for SqliteGameStateStore {
    fn insert_state(&self, state: EncodedGameState) -> BoxFuture<'static, StorageResult<RecordId>> {
        let store = self.clone();
        Box::pin(async move {
            run_blocking(move || store.insert(&state))
                .await
                .map_err(Into::into)
        })
    }

    fn latest_state(&self) -> BoxFuture<'static, StorageResult<Option<StoredGameState>>> {
        let store = self.clone();
        Box::pin(async move { run_blocking(move || store.latest()).await.map_err(Into::into) })
    }

    fn count_states(&self) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move { run_blocking(move || store.count()).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { run_blocking(move || store.ping()).await.map_err(Into::into) })
    }
}
