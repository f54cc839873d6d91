//! Shattered Realms Back binary entrypoint wiring the save/load REST API to SQLite storage.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shattered_realms_back::{
    config::AppConfig,
    dao::{
        game_state_store::{GameStateStore, sqlite::SqliteGameStateStore},
        storage::StorageError,
    },
    routes,
    services::storage_supervisor,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let sqlite_config = config
        .sqlite_config()
        .with_context(|| format!("resolving database url `{}`", config.database_url()))?;

    let app_state = AppState::new();

    tokio::spawn(storage_supervisor::run(app_state.clone(), move || {
        let sqlite_config = sqlite_config.clone();
        async move {
            let store = SqliteGameStateStore::connect(sqlite_config)
                .await
                .map_err(StorageError::from)?;
            Ok::<Arc<dyn GameStateStore>, StorageError>(Arc::new(store))
        }
    }));
    // Serve right away; requests answer 503 until the store is installed.
    let app = build_router(app_state);

    let addr = config.listen_addr();
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    info!("shutdown signal received");
}
