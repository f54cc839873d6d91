use tracing::warn;

use crate::{dao::game_state::GameStateRepository, dto::health::HealthResponse, state::SharedState};

/// Report storage status by counting stored snapshots through the same store
/// `POST /save` and `GET /load` would use.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let store = match state.require_game_store().await {
        Ok(store) => store,
        Err(err) => {
            warn!(error = %err, "healthcheck answered without storage");
            return HealthResponse::degraded();
        }
    };

    match GameStateRepository::new(store).count_records().await {
        Ok(records) => HealthResponse::ok(records),
        Err(err) => {
            warn!(error = %err, "storage did not answer the healthcheck");
            HealthResponse::degraded()
        }
    }
}
