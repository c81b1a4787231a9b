use std::sync::Arc;

use geodemo_db::QueryExecutor;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Query path to Firebolt (a fake in tests).
    pub db: Arc<dyn QueryExecutor>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
