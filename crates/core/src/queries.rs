//! SQL templates sent to the analytical database, with the row shapes they
//! return.
//!
//! All spatial predicates are the engine's own (`ST_DISTANCE`,
//! `ST_CONTAINS`, `ST_COVERS`); the templates only splice validated filter
//! values into fixed statements.

use serde::{Deserialize, Serialize};

use crate::analysis::{ContainmentFilter, CoverageFilter, DistanceFilter};
use crate::error::CoreError;
use crate::geo::{circle_ring, polygon_wkt, round_to, CIRCLE_VERTICES};
use crate::orders::Order;
use crate::schema::{zones_table, CUSTOMER_ORDERS, ORDERS_TABLE, ZONES_TABLE};
use crate::sql::{float_lit, in_list, quote_str};
use crate::types::{flexible_bool, TIMESTAMP_FORMAT};
use crate::zones::{Zone, ZoneSchema, ZoneShape};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

pub const DISTANCE_ROW_LIMIT: u32 = 1000;
pub const CONTAINMENT_ROW_LIMIT: u32 = 500;
pub const COVERAGE_ROW_LIMIT: u32 = 200;

/// Half-width of the pre-filter box around a coverage center, in degrees.
pub const COVERAGE_BOX_HALF_DEG: f64 = 0.1;

/// Rows per multi-row `INSERT` statement.
pub const INSERT_BATCH_SIZE: usize = 1000;

const CUSTOMER_POINT: &str = "ST_GEOGPOINT(customer_lon, customer_lat)";
const STORE_POINT: &str = "ST_GEOGPOINT(store_lon, store_lat)";

// ---------------------------------------------------------------------------
// Row shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CountRow {
    pub row_count: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoreRow {
    pub store_id: String,
    pub store_lat: f64,
    pub store_lon: f64,
}

/// A `geo_zones` row projected onto a common shape for both variants.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ZoneRow {
    pub zone_id: String,
    pub zone_name: String,
    pub zone_type: String,
    pub center_lat: f64,
    pub center_lon: f64,
    #[serde(default)]
    pub polygon_wkt: Option<String>,
    #[serde(default)]
    pub radius_km: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DistanceRow {
    pub order_id: String,
    pub store_id: String,
    pub customer_lat: f64,
    pub customer_lon: f64,
    pub store_lat: f64,
    pub store_lon: f64,
    pub order_value: f64,
    pub delivery_time_minutes: i32,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ContainmentRow {
    pub order_id: String,
    pub customer_lat: f64,
    pub customer_lon: f64,
    pub order_value: f64,
    pub store_id: String,
    pub zone_id: String,
    pub zone_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CoverageRow {
    pub order_id: String,
    pub customer_lat: f64,
    pub customer_lon: f64,
    pub order_value: f64,
    pub store_id: String,
    pub distance_km: f64,
    #[serde(deserialize_with = "flexible_bool::deserialize")]
    pub is_covered: bool,
}

// ---------------------------------------------------------------------------
// Catalog queries
// ---------------------------------------------------------------------------

/// `SELECT COUNT(*)` for one table, returned as `row_count`.
pub fn count_rows(table: &str) -> String {
    format!("SELECT COUNT(*) AS row_count FROM {table}")
}

pub fn distinct_stores() -> String {
    format!(
        "SELECT DISTINCT store_id, store_lat, store_lon\n\
         FROM {ORDERS_TABLE}\n\
         ORDER BY store_id"
    )
}

/// List zones, projecting either schema variant onto [`ZoneRow`].
pub fn list_zones(schema: ZoneSchema) -> String {
    let projection = match schema {
        ZoneSchema::Polygon => "center_lat, center_lon, polygon_wkt",
        ZoneSchema::Radius => {
            "zone_lat AS center_lat, zone_lon AS center_lon, zone_radius AS radius_km"
        }
    };
    format!(
        "SELECT zone_id, zone_name, zone_type, {projection}\n\
         FROM {ZONES_TABLE}\n\
         ORDER BY zone_name"
    )
}

// ---------------------------------------------------------------------------
// Analysis queries
// ---------------------------------------------------------------------------

/// Store Coverage Analysis: orders within `max_distance_km` of their store.
pub fn store_distance(filter: &DistanceFilter) -> Result<String, CoreError> {
    filter.validate()?;

    let stores = in_list(&filter.store_ids)?;
    let max_meters = u64::from(filter.max_distance_km) * 1000;
    let distance = format!("ST_DISTANCE({CUSTOMER_POINT}, {STORE_POINT})");

    Ok(format!(
        "SELECT\n    \
             order_id,\n    \
             store_id,\n    \
             customer_lat,\n    \
             customer_lon,\n    \
             store_lat,\n    \
             store_lon,\n    \
             order_value,\n    \
             delivery_time_minutes,\n    \
             ROUND({distance} / 1000.0, 2) AS distance_km\n\
         FROM {ORDERS_TABLE}\n\
         WHERE store_id IN {stores}\n  \
           AND order_value >= {min_value}\n  \
           AND {distance} <= {max_meters}\n\
         ORDER BY store_id, distance_km\n\
         LIMIT {DISTANCE_ROW_LIMIT}",
        min_value = filter.min_order_value,
    ))
}

/// Customer Zone Analysis: one row per (order, selected zone) where the zone
/// contains the customer location.
pub fn zone_containment(filter: &ContainmentFilter, schema: ZoneSchema) -> Result<String, CoreError> {
    filter.validate()?;

    let zones = in_list(&filter.zone_ids)?;
    let customer = "ST_GEOGPOINT(o.customer_lon, o.customer_lat)";
    let predicate = match schema {
        ZoneSchema::Polygon => {
            format!("ST_CONTAINS(ST_GEOGFROMTEXT(z.polygon_wkt), {customer})")
        }
        ZoneSchema::Radius => format!(
            "ST_DISTANCE(ST_GEOGPOINT(z.zone_lon, z.zone_lat), {customer}) <= z.zone_radius * 1000"
        ),
    };

    Ok(format!(
        "SELECT\n    \
             o.order_id,\n    \
             o.customer_lat,\n    \
             o.customer_lon,\n    \
             o.order_value,\n    \
             o.store_id,\n    \
             z.zone_id,\n    \
             z.zone_name\n\
         FROM {ORDERS_TABLE} AS o\n\
         CROSS JOIN {ZONES_TABLE} AS z\n\
         WHERE z.zone_id IN {zones}\n  \
           AND {predicate}\n\
         ORDER BY o.order_value DESC\n\
         LIMIT {CONTAINMENT_ROW_LIMIT}"
    ))
}

/// The WKT circle a coverage filter tests against.
pub fn coverage_polygon(filter: &CoverageFilter) -> String {
    polygon_wkt(&circle_ring(
        filter.center.point(),
        filter.radius_km,
        CIRCLE_VERTICES,
    ))
}

/// Service Area Coverage: candidate orders around the center with their
/// distance and an `ST_COVERS` flag.
pub fn coverage(filter: &CoverageFilter) -> Result<String, CoreError> {
    filter.validate()?;

    // The candidate box is fixed whatever the radius, so the coverage rate
    // is always measured against the same neighbourhood of the center.
    let center = filter.center.point();
    let bound = |v: f64| float_lit(round_to(v, 6));

    let lat = float_lit(center.lat)?;
    let lon = float_lit(center.lon)?;
    let lat_min = bound(center.lat - COVERAGE_BOX_HALF_DEG)?;
    let lat_max = bound(center.lat + COVERAGE_BOX_HALF_DEG)?;
    let lon_min = bound(center.lon - COVERAGE_BOX_HALF_DEG)?;
    let lon_max = bound(center.lon + COVERAGE_BOX_HALF_DEG)?;
    let area = quote_str(&coverage_polygon(filter));

    Ok(format!(
        "WITH candidates AS (\n    \
             SELECT\n        \
                 order_id,\n        \
                 customer_lat,\n        \
                 customer_lon,\n        \
                 order_value,\n        \
                 store_id,\n        \
                 ST_DISTANCE({CUSTOMER_POINT}, ST_GEOGPOINT({lon}, {lat})) / 1000.0 AS distance_km,\n        \
                 ST_COVERS(ST_GEOGFROMTEXT({area}), {CUSTOMER_POINT}) AS is_covered\n    \
             FROM {ORDERS_TABLE}\n    \
             WHERE customer_lat BETWEEN {lat_min} AND {lat_max}\n      \
               AND customer_lon BETWEEN {lon_min} AND {lon_max}\n\
         )\n\
         SELECT\n    \
             order_id,\n    \
             customer_lat,\n    \
             customer_lon,\n    \
             order_value,\n    \
             store_id,\n    \
             ROUND(distance_km, 2) AS distance_km,\n    \
             is_covered\n\
         FROM candidates\n\
         ORDER BY distance_km\n\
         LIMIT {COVERAGE_ROW_LIMIT}"
    ))
}

// ---------------------------------------------------------------------------
// Bulk load
// ---------------------------------------------------------------------------

/// Multi-row insert for a batch of orders.
pub fn insert_orders(orders: &[Order]) -> Result<String, CoreError> {
    if orders.is_empty() {
        return Err(CoreError::Validation("No orders to insert".to_string()));
    }

    let mut values = Vec::with_capacity(orders.len());
    for o in orders {
        values.push(format!(
            "({}, {}, TIMESTAMP {}, {}, {}, {}, {}, {}, {}, {})",
            quote_str(&o.order_id),
            quote_str(&o.customer_id),
            quote_str(&o.order_date.format(TIMESTAMP_FORMAT).to_string()),
            float_lit(o.customer_lat)?,
            float_lit(o.customer_lon)?,
            float_lit(o.order_value)?,
            quote_str(&o.store_id),
            float_lit(o.store_lat)?,
            float_lit(o.store_lon)?,
            o.delivery_time_minutes,
        ));
    }

    Ok(format!(
        "INSERT INTO {ORDERS_TABLE} ({}) VALUES\n{}",
        CUSTOMER_ORDERS.column_list(),
        values.join(",\n")
    ))
}

/// Multi-row insert for zones in the given schema variant.
///
/// Circular zones are converted to polygons for the polygon layout.
pub fn insert_zones(zones: &[Zone], schema: ZoneSchema) -> Result<String, CoreError> {
    if zones.is_empty() {
        return Err(CoreError::Validation("No zones to insert".to_string()));
    }

    let mut values = Vec::with_capacity(zones.len());
    for zone in zones {
        let zone = zone.clone().for_schema(schema)?;
        let center = zone.center();
        let tail = match &zone.shape {
            ZoneShape::Polygon { wkt, .. } => quote_str(wkt),
            ZoneShape::Circle { radius_km, .. } => float_lit(*radius_km)?,
        };
        values.push(format!(
            "({}, {}, {}, {}, {}, {})",
            quote_str(&zone.zone_id),
            quote_str(&zone.zone_name),
            quote_str(zone.zone_type.as_str()),
            float_lit(center.lat)?,
            float_lit(center.lon)?,
            tail,
        ));
    }

    Ok(format!(
        "INSERT INTO {ZONES_TABLE} ({}) VALUES\n{}",
        zones_table(schema).column_list(),
        values.join(",\n")
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
