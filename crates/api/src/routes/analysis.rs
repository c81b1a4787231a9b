//! Route definitions for the three analysis pages.

use axum::routing::get;
use axum::Router;

use crate::handlers::analysis;
use crate::state::AppState;

/// Analysis routes mounted at `/analysis`.
///
/// ```text
/// GET  /distance      -> store_distance
/// GET  /containment   -> zone_containment
/// GET  /coverage      -> service_coverage
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/distance", get(analysis::store_distance))
        .route("/containment", get(analysis::zone_containment))
        .route("/coverage", get(analysis::service_coverage))
}
