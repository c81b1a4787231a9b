//! Route definitions for static reference content.

use axum::routing::get;
use axum::Router;

use crate::handlers::reference;
use crate::state::AppState;

/// Reference routes mounted at `/reference`.
///
/// ```text
/// GET  /functions   -> functions
/// GET  /controls    -> controls
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/functions", get(reference::functions))
        .route("/controls", get(reference::controls))
}
