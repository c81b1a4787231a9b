//! Handlers for the three analysis pages.
//!
//! Each one turns query parameters into a validated filter, renders the
//! SQL, runs it once against Firebolt and returns the rows together with
//! summary metrics and ready-to-plot figures. Nothing is cached between
//! requests.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use geodemo_core::analysis::{
    ContainmentFilter, CoverageFilter, DistanceFilter, DEFAULT_MAX_DISTANCE_KM,
    DEFAULT_MIN_ORDER_VALUE,
};
use geodemo_core::error::CoreError;
use geodemo_core::geo::GeoPoint;
use geodemo_core::queries::{self, ContainmentRow, CoverageRow, DistanceRow, ZoneRow};
use geodemo_core::reference::{
    containment_reference_sql, coverage_reference_sql, distance_reference_sql,
};
use geodemo_core::stats::{
    store_performance, summarize_containment, summarize_coverage, summarize_distance,
    ContainmentSummary, CoverageSummary, DistanceSummary, StorePerformance,
};
use geodemo_db::query_as;
use serde::Serialize;

use crate::charts::{self, Figure, CHART_MIN_ROWS};
use crate::error::AppResult;
use crate::handlers::catalog::{load_stores, load_zones};
use crate::query::{resolve_selection, ContainmentParams, CoverageParams, DistanceParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct DistanceAnalysis {
    pub filter: DistanceFilter,
    /// The statement that produced `rows`.
    pub sql: String,
    pub reference_sql: String,
    pub summary: DistanceSummary,
    pub store_performance: Vec<StorePerformance>,
    pub map: Option<Figure>,
    pub histogram: Option<Figure>,
    pub scatter: Option<Figure>,
    pub notice: Option<String>,
    pub rows: Vec<DistanceRow>,
}

#[derive(Debug, Serialize)]
pub struct ContainmentAnalysis {
    pub filter: ContainmentFilter,
    pub sql: String,
    pub reference_sql: &'static str,
    pub summary: ContainmentSummary,
    pub map: Option<Figure>,
    pub notice: Option<String>,
    pub rows: Vec<ContainmentRow>,
}

#[derive(Debug, Serialize)]
pub struct CoverageAnalysis {
    pub filter: CoverageFilter,
    pub center: GeoPoint,
    /// WKT of the circle `ST_COVERS` tested against.
    pub service_area_wkt: String,
    pub sql: String,
    pub reference_sql: String,
    pub summary: CoverageSummary,
    pub map: Option<Figure>,
    pub notice: Option<String>,
    pub rows: Vec<CoverageRow>,
}

// ---------------------------------------------------------------------------
// Store coverage
// ---------------------------------------------------------------------------

/// GET /api/v1/analysis/distance
pub async fn store_distance(
    State(state): State<AppState>,
    params: Result<Query<DistanceParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<DistanceAnalysis>>> {
    let Query(params) = params?;
    let stores = load_stores(&state).await?;
    let available: Vec<String> = stores.into_iter().map(|s| s.store_id).collect();

    let filter = DistanceFilter {
        store_ids: resolve_selection(params.stores.as_deref(), &available),
        max_distance_km: params.max_distance_km.unwrap_or(DEFAULT_MAX_DISTANCE_KM),
        min_order_value: params.min_order_value.unwrap_or(DEFAULT_MIN_ORDER_VALUE),
    };
    let sql = queries::store_distance(&filter)?;
    let rows: Vec<DistanceRow> = query_as(state.db.as_ref(), &sql).await?;

    tracing::debug!(
        stores = ?filter.store_ids,
        max_distance_km = filter.max_distance_km,
        rows = rows.len(),
        "Store distance analysis"
    );

    let has_rows = !rows.is_empty();
    let charted = rows.len() > CHART_MIN_ROWS;

    let analysis = DistanceAnalysis {
        reference_sql: distance_reference_sql(&filter),
        summary: summarize_distance(&rows),
        store_performance: store_performance(&rows),
        map: has_rows.then(|| charts::distance_map(&rows, &filter.store_ids, filter.max_distance_km)),
        histogram: charted.then(|| charts::distance_histogram(&rows)),
        scatter: charted.then(|| charts::distance_scatter(&rows, &filter.store_ids)),
        notice: (!has_rows).then(|| {
            format!(
                "No orders found within {}km of selected stores",
                filter.max_distance_km
            )
        }),
        filter,
        sql,
        rows,
    };

    Ok(Json(DataResponse { data: analysis }))
}

// ---------------------------------------------------------------------------
// Customer zones
// ---------------------------------------------------------------------------

/// GET /api/v1/analysis/containment
pub async fn zone_containment(
    State(state): State<AppState>,
    params: Result<Query<ContainmentParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<ContainmentAnalysis>>> {
    let Query(params) = params?;
    let zones = load_zones(&state).await?;
    let available: Vec<String> = zones.iter().map(|z| z.zone_id.clone()).collect();

    let filter = ContainmentFilter {
        zone_ids: resolve_selection(params.zones.as_deref(), &available),
    };
    filter.validate()?;

    let selected = filter
        .zone_ids
        .iter()
        .map(|id| {
            zones
                .iter()
                .find(|z| &z.zone_id == id)
                .ok_or_else(|| CoreError::NotFound {
                    entity: "Zone",
                    id: id.clone(),
                })
        })
        .collect::<Result<Vec<&ZoneRow>, CoreError>>()?;

    let sql = queries::zone_containment(&filter, state.config.zone_schema)?;
    let rows: Vec<ContainmentRow> = query_as(state.db.as_ref(), &sql).await?;

    tracing::debug!(zones = ?filter.zone_ids, rows = rows.len(), "Zone containment analysis");

    let has_rows = !rows.is_empty();
    let analysis = ContainmentAnalysis {
        reference_sql: containment_reference_sql(),
        summary: summarize_containment(&rows),
        map: has_rows.then(|| charts::containment_map(&rows, &selected)),
        notice: (!has_rows).then(|| "No customers found in selected zones".to_string()),
        filter,
        sql,
        rows,
    };

    Ok(Json(DataResponse { data: analysis }))
}

// ---------------------------------------------------------------------------
// Service area coverage
// ---------------------------------------------------------------------------

/// GET /api/v1/analysis/coverage
pub async fn service_coverage(
    State(state): State<AppState>,
    params: Result<Query<CoverageParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<CoverageAnalysis>>> {
    let Query(params) = params?;
    let filter = params.into_filter();
    let sql = queries::coverage(&filter)?;
    let rows: Vec<CoverageRow> = query_as(state.db.as_ref(), &sql).await?;

    tracing::debug!(
        scenario = ?filter.scenario,
        center = ?filter.center,
        radius_km = filter.radius_km,
        rows = rows.len(),
        "Service coverage analysis"
    );

    let has_rows = !rows.is_empty();
    let analysis = CoverageAnalysis {
        center: filter.center.point(),
        service_area_wkt: queries::coverage_polygon(&filter),
        reference_sql: coverage_reference_sql(&filter),
        summary: summarize_coverage(&rows, filter.radius_km),
        map: has_rows.then(|| charts::coverage_map(&rows, &filter)),
        notice: (!has_rows).then(|| "No customer data found in the selected area".to_string()),
        filter,
        sql,
        rows,
    };

    Ok(Json(DataResponse { data: analysis }))
}
