use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::{dao::game_state_store::GameStateStore, error::ServiceError};

/// Cheaply clonable handle handed to every route.
pub type SharedState = Arc<AppState>;

/// Central application state holding the storage handle and the degraded flag.
pub struct AppState {
    game_store: RwLock<Option<Arc<dyn GameStateStore>>>,
    degraded: watch::Sender<bool>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new() -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            game_store: RwLock::new(None),
            degraded: degraded_tx,
        })
    }

    /// Obtain a handle to the current game state store, if one is installed.
    pub async fn game_store(&self) -> Option<Arc<dyn GameStateStore>> {
        let guard = self.game_store.read().await;
        guard.as_ref().cloned()
    }

    /// Store to serve a request with, refused while degraded.
    pub async fn require_game_store(&self) -> Result<Arc<dyn GameStateStore>, ServiceError> {
        if self.is_degraded().await {
            return Err(ServiceError::Degraded);
        }
        self.game_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new store implementation and leave degraded mode.
    pub async fn set_game_store(&self, store: Arc<dyn GameStateStore>) {
        {
            let mut guard = self.game_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false).await;
    }

    /// Remove the current store and enter degraded mode.
    pub async fn clear_game_store(&self) {
        {
            let mut guard = self.game_store.write().await;
            guard.take();
        }
        self.update_degraded(true).await;
    }

    /// Current degraded flag.
    pub async fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Flip the degraded flag, notifying watchers only when the value changes.
    pub async fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }
}
