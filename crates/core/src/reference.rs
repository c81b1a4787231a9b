//! Static reference content: the geospatial functions table and the SQL
//! reference snippets shown beside each analysis.

use serde::Serialize;

use crate::analysis::{CoverageFilter, DistanceFilter};
use crate::sql::in_list;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FunctionReference {
    pub function: &'static str,
    pub description: &'static str,
    pub example: &'static str,
    pub returns: &'static str,
    pub demo: &'static str,
}

pub const FUNCTIONS: &[FunctionReference] = &[
    FunctionReference {
        function: "ST_DISTANCE(geo1, geo2)",
        description: "Returns the distance between two geographies in meters",
        example: "WHERE ST_DISTANCE(point1, point2) <= 5000",
        returns: "Distance in meters",
        demo: "Store coverage analysis",
    },
    FunctionReference {
        function: "ST_CONTAINS(polygon, point)",
        description: "Tests if a polygon contains a point",
        example: "ST_CONTAINS(zone_boundary, customer_location)",
        returns: "Boolean",
        demo: "Customer zone analysis",
    },
    FunctionReference {
        function: "ST_COVERS(geo1, geo2)",
        description: "Tests if geography A completely covers geography B",
        example: "ST_COVERS(service_area, facility_location)",
        returns: "Boolean",
        demo: "Service area coverage",
    },
    FunctionReference {
        function: "ST_GEOGPOINT(lon, lat)",
        description: "Builds a point geography from longitude and latitude",
        example: "ST_GEOGPOINT(customer_lon, customer_lat)",
        returns: "GEOGRAPHY",
        demo: "All analyses",
    },
    FunctionReference {
        function: "ST_GEOGFROMTEXT(wkt)",
        description: "Parses a WKT string into a geography",
        example: "ST_GEOGFROMTEXT(polygon_wkt)",
        returns: "GEOGRAPHY",
        demo: "Customer zone analysis, service area coverage",
    },
];

/// Reference snippet for the distance page, filled with the current
/// selection. Falls back to a placeholder list when nothing is selected.
pub fn distance_reference_sql(filter: &DistanceFilter) -> String {
    let stores = in_list(&filter.store_ids).unwrap_or_else(|_| "('STORE_001')".to_string());
    let max_meters = u64::from(filter.max_distance_km) * 1000;
    format!(
        "-- ST_DISTANCE() with spatial filtering
SELECT
    order_id,
    store_id,
    order_value,
    ST_DISTANCE(
        ST_GEOGPOINT(customer_lon, customer_lat),
        ST_GEOGPOINT(store_lon, store_lat)
    ) / 1000.0 AS distance_km
FROM customer_orders
WHERE ST_DISTANCE(
    ST_GEOGPOINT(customer_lon, customer_lat),
    ST_GEOGPOINT(store_lon, store_lat)
) <= {max_meters}  -- distance in meters
AND order_value >= {min_value}
ORDER BY distance_km ASC;

-- Bounding-box pre-filter before the exact distance test
SELECT *
FROM customer_orders
WHERE store_id IN {stores}
AND customer_lat BETWEEN store_lat - 0.1 AND store_lat + 0.1
AND customer_lon BETWEEN store_lon - 0.1 AND store_lon + 0.1
AND ST_DISTANCE(
    ST_GEOGPOINT(customer_lon, customer_lat),
    ST_GEOGPOINT(store_lon, store_lat)
) <= {max_meters};",
        min_value = filter.min_order_value,
    )
}

pub fn containment_reference_sql() -> &'static str {
    "-- ST_CONTAINS() checks if a polygon contains a point
SELECT o.order_id, z.zone_name
FROM customer_orders AS o
CROSS JOIN geo_zones AS z
WHERE ST_CONTAINS(
    ST_GEOGFROMTEXT(z.polygon_wkt),
    ST_GEOGPOINT(o.customer_lon, o.customer_lat)
);

-- Revenue inside a single zone
SELECT
    COUNT(*) AS customers_in_zone,
    SUM(order_value) AS total_revenue
FROM customer_orders AS o, geo_zones AS z
WHERE z.zone_id = 'ZONE_001'
AND ST_CONTAINS(
    ST_GEOGFROMTEXT(z.polygon_wkt),
    ST_GEOGPOINT(o.customer_lon, o.customer_lat)
);"
}

pub fn coverage_reference_sql(filter: &CoverageFilter) -> String {
    format!(
        "-- ST_COVERS() tests whether an area covers a point ({scenario})
SELECT order_id,
       ST_COVERS(
           ST_GEOGFROMTEXT(service_area_wkt),
           ST_GEOGPOINT(customer_lon, customer_lat)
       ) AS is_covered
FROM customer_orders;

-- Coverage rate per zone
SELECT
    z.zone_name,
    COUNT(*) AS total_customers,
    SUM(CASE WHEN ST_COVERS(ST_GEOGFROMTEXT(z.polygon_wkt),
                            ST_GEOGPOINT(o.customer_lon, o.customer_lat))
        THEN 1 ELSE 0 END) AS covered_customers
FROM geo_zones AS z
CROSS JOIN customer_orders AS o
GROUP BY z.zone_name
ORDER BY covered_customers DESC;",
        scenario = filter.scenario.label(),
    )
}
