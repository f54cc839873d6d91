/// Encoding of snapshots to and from their stored JSON text.
pub mod codec;
/// Save/load repository over the game state store.
pub mod game_state;
/// Game state storage backends.
pub mod game_state_store;
/// Database model definitions.
pub mod models;
/// Storage abstraction layer for database operations.
pub mod storage;
