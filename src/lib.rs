//! Library crate for shattered-realms-back, exposing modules for binaries and integration tests.

/// Runtime configuration: config file plus environment overrides.
pub mod config;
/// Persistence layer: snapshot models, codec and the SQLite store.
pub mod dao;
mod dto;
mod error;
/// HTTP routes: save/load, healthcheck and API docs.
pub mod routes;
/// Request handling behind the routes, plus the storage supervisor.
pub mod services;
/// Shared application state.
pub mod state;
