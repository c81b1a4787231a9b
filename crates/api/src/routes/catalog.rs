use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Store and zone listings, merged at the `/api/v1` root.
///
/// ```text
/// GET  /stores   -> list_stores
/// GET  /zones    -> list_zones
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stores", get(catalog::list_stores))
        .route("/zones", get(catalog::list_zones))
}
