//! Service helpers implementing the save/load contract for the game client.

use tracing::{debug, info};

use crate::{
    dao::game_state::GameStateRepository,
    dto::game_state::{LoadGameResponse, SaveGameRequest, SaveGameResponse},
    error::ServiceError,
    state::SharedState,
};

/// Validate the submitted snapshot and append it to storage.
///
/// Nothing is written when a required field is missing.
pub async fn save_game(
    state: &SharedState,
    request: SaveGameRequest,
) -> Result<SaveGameResponse, ServiceError> {
    let snapshot = request.into_snapshot()?;

    let repository = GameStateRepository::new(state.require_game_store().await?);
    let id = repository.create_record(snapshot).await?;

    info!(%id, "game state saved");
    Ok(SaveGameResponse::success())
}

/// Return the most recent snapshot with its fields left as stored JSON text.
pub async fn load_game(state: &SharedState) -> Result<LoadGameResponse, ServiceError> {
    let repository = GameStateRepository::new(state.require_game_store().await?);

    match repository.get_latest_encoded().await? {
        Some(stored) => {
            debug!(id = %stored.id, "loaded latest game state");
            Ok(stored.into())
        }
        None => {
            debug!("no game state saved yet");
            Ok(LoadGameResponse::empty())
        }
    }
}
