pub mod analysis;
pub mod catalog;
pub mod health;
pub mod reference;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /status                        sample data row counts and setup guide
/// /reference/functions           geospatial functions table
/// /reference/controls            slider ranges and option lists
/// /stores                        distinct stores in customer_orders
/// /zones                         zones in geo_zones
/// /analysis/distance             store coverage (ST_DISTANCE)
/// /analysis/containment          customer zones (ST_CONTAINS)
/// /analysis/coverage             service area coverage (ST_COVERS)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(handlers::status::data_status))
        .nest("/reference", reference::router())
        .merge(catalog::router())
        .nest("/analysis", analysis::router())
}
