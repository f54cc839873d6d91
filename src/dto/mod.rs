/// Save and load payloads.
pub mod game_state;
/// Healthcheck payload.
pub mod health;
