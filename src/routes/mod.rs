use axum::Router;

use crate::state::SharedState;

/// Swagger UI and the OpenAPI JSON document.
pub mod docs;
/// `POST /save` and `GET /load`.
pub mod game_state;
/// `GET /healthcheck`.
pub mod health;

/// Compose the health, save/load and documentation routes and attach shared state.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(game_state::router())
        .merge(docs::router())
        .with_state(state)
}
