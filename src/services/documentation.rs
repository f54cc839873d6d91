use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Shattered Realms Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::game_state::save_game,
        crate::routes::game_state::load_game,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::StorageStatus,
            crate::dto::game_state::SaveGameRequest,
            crate::dto::game_state::SaveGameResponse,
            crate::dto::game_state::LoadGameResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "game-state", description = "Save and load player snapshots"),
    )
)]
pub struct ApiDoc;
