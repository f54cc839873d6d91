use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::game_state::{LoadGameResponse, SaveGameRequest, SaveGameResponse},
    error::AppError,
    services::game_state_service,
    state::SharedState,
};

/// Routes used by the game client to persist and restore player state.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/save", post(save_game))
        .route("/load", get(load_game))
}

/// Append a new snapshot of the player state.
#[utoipa::path(
    post,
    path = "/save",
    tag = "game-state",
    request_body = SaveGameRequest,
    responses(
        (status = 200, description = "Snapshot stored", body = SaveGameResponse),
        (status = 400, description = "A required field is missing"),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn save_game(
    State(state): State<SharedState>,
    Json(payload): Json<SaveGameRequest>,
) -> Result<Json<SaveGameResponse>, AppError> {
    let response = game_state_service::save_game(&state, payload).await?;
    Ok(Json(response))
}

/// Return the most recently saved snapshot, or `{}` when nothing was saved yet.
#[utoipa::path(
    get,
    path = "/load",
    tag = "game-state",
    responses(
        (status = 200, description = "Latest snapshot, fields as JSON text", body = LoadGameResponse),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn load_game(
    State(state): State<SharedState>,
) -> Result<Json<LoadGameResponse>, AppError> {
    let response = game_state_service::load_game(&state).await?;
    Ok(Json(response))
}
