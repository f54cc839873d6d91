/// OpenAPI documentation generation.
pub mod documentation;
/// Save and load of player snapshots.
pub mod game_state_service;
/// Health check service.
pub mod health_service;
/// Storage connection supervisor with backoff.
pub mod storage_supervisor;
