//! Handlers for the selectable stores and zones.
//!
//! Both lists come from the database, not from the fixed seed data, so the
//! dashboard only offers what was actually loaded.

use axum::extract::State;
use axum::Json;
use geodemo_core::error::CoreError;
use geodemo_core::geo::GeoPoint;
use geodemo_core::queries::{self, StoreRow, ZoneRow};
use geodemo_core::schema::{ORDERS_TABLE, ZONES_TABLE};
use geodemo_core::stores::find_store;
use geodemo_db::query_as;
use serde::Serialize;

use crate::charts::zone_boundary;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StoreItem {
    pub store_id: String,
    /// Neighbourhood name when the id is one of the known stores.
    pub name: Option<&'static str>,
    pub location: GeoPoint,
}

#[derive(Debug, Serialize)]
pub struct ZoneItem {
    pub zone_id: String,
    pub zone_name: String,
    pub zone_type: String,
    pub center: GeoPoint,
    pub radius_km: Option<f64>,
    pub boundary: Vec<GeoPoint>,
}

// ---------------------------------------------------------------------------
// Shared loaders
// ---------------------------------------------------------------------------

/// Distinct stores present in `customer_orders`.
///
/// An empty table is reported as [`CoreError::NoSampleData`].
pub(crate) async fn load_stores(state: &AppState) -> AppResult<Vec<StoreRow>> {
    let stores: Vec<StoreRow> = query_as(state.db.as_ref(), &queries::distinct_stores()).await?;
    if stores.is_empty() {
        return Err(CoreError::NoSampleData { table: ORDERS_TABLE }.into());
    }
    Ok(stores)
}

/// Zones present in `geo_zones`, ordered by name.
pub(crate) async fn load_zones(state: &AppState) -> AppResult<Vec<ZoneRow>> {
    let sql = queries::list_zones(state.config.zone_schema);
    let zones: Vec<ZoneRow> = query_as(state.db.as_ref(), &sql).await?;
    if zones.is_empty() {
        return Err(CoreError::NoSampleData { table: ZONES_TABLE }.into());
    }
    Ok(zones)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/stores
pub async fn list_stores(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<StoreItem>>>> {
    let items = load_stores(&state)
        .await?
        .into_iter()
        .map(|row| StoreItem {
            name: find_store(&row.store_id).map(|s| s.name),
            location: GeoPoint::new(row.store_lat, row.store_lon),
            store_id: row.store_id,
        })
        .collect();

    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/zones
pub async fn list_zones(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<ZoneItem>>>> {
    let items = load_zones(&state)
        .await?
        .into_iter()
        .map(|row| ZoneItem {
            boundary: zone_boundary(&row),
            center: GeoPoint::new(row.center_lat, row.center_lon),
            radius_km: row.radius_km,
            zone_id: row.zone_id,
            zone_name: row.zone_name,
            zone_type: row.zone_type,
        })
        .collect();

    Ok(Json(DataResponse { data: items }))
}
