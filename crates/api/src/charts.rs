//! Plotly figure JSON for the dashboard's maps and charts.
//!
//! The server only assembles traces and layouts; the page hands each
//! [`Figure`] to `Plotly.newPlot` unchanged. Maps use `scattermap` traces on
//! the `open-street-map` style.

use geodemo_core::analysis::CoverageFilter;
use geodemo_core::geo::{
    circle_ring, parse_polygon_wkt, GeoPoint, BENGALURU_CENTER, CIRCLE_VERTICES,
};
use geodemo_core::queries::{ContainmentRow, CoverageRow, DistanceRow, ZoneRow};
use serde::Serialize;
use serde_json::{json, Value};

/// Minimum row count before the distance histogram and scatter are drawn.
pub const CHART_MIN_ROWS: usize = 10;

const STORE_COLORS: [&str; 7] = ["blue", "green", "red", "orange", "purple", "brown", "pink"];
const ZONE_COLORS: [&str; 5] = ["blue", "green", "red", "orange", "purple"];

const MAP_STYLE: &str = "open-street-map";

/// A Plotly figure: trace list plus layout.
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
}

// ---------------------------------------------------------------------------
// Trace helpers
// ---------------------------------------------------------------------------

fn split_coords(points: impl IntoIterator<Item = GeoPoint>) -> (Vec<f64>, Vec<f64>) {
    points.into_iter().map(|p| (p.lat, p.lon)).unzip()
}

fn markers(name: String, points: Vec<GeoPoint>, text: Vec<String>, marker: Value) -> Value {
    let (lat, lon) = split_coords(points);
    json!({
        "type": "scattermap",
        "mode": "markers",
        "name": name,
        "lat": lat,
        "lon": lon,
        "text": text,
        "marker": marker,
        "hovertemplate": "<b>%{text}</b><br>Lat: %{lat}<br>Lon: %{lon}<extra></extra>",
    })
}

fn outline(name: String, ring: &[GeoPoint], color: &str, fill: &str) -> Value {
    let (lat, lon) = split_coords(ring.iter().copied());
    json!({
        "type": "scattermap",
        "mode": "lines",
        "name": name,
        "lat": lat,
        "lon": lon,
        "line": { "width": 3, "color": color },
        "fill": "toself",
        "fillcolor": fill,
    })
}

fn map_layout(title: String, center: GeoPoint, zoom: f64, height: u32) -> Value {
    json!({
        "title": { "text": title },
        "map": {
            "style": MAP_STYLE,
            "center": { "lat": center.lat, "lon": center.lon },
            "zoom": zoom,
        },
        "height": height,
        "margin": { "l": 0, "r": 0, "t": 48, "b": 0 },
    })
}

/// Translucent fill for a named outline color.
fn fill_for(color: &str) -> &'static str {
    match color {
        "red" => "rgba(255,0,0,0.1)",
        "green" => "rgba(0,255,0,0.1)",
        "blue" => "rgba(0,0,255,0.1)",
        "orange" => "rgba(255,165,0,0.1)",
        _ => "rgba(128,0,128,0.1)",
    }
}

/// Map boundary of a zone row: the stored polygon, a circle around the
/// center for the radius layout, or just the center when neither parses.
pub fn zone_boundary(zone: &ZoneRow) -> Vec<GeoPoint> {
    let center = GeoPoint::new(zone.center_lat, zone.center_lon);
    if let Some(ring) = zone.polygon_wkt.as_deref().and_then(parse_polygon_wkt) {
        return ring;
    }
    match zone.radius_km {
        Some(radius_km) => circle_ring(center, radius_km, CIRCLE_VERTICES),
        None => vec![center],
    }
}

// ---------------------------------------------------------------------------
// Store distance
// ---------------------------------------------------------------------------

/// Customers colored by store, with a large marker on each store.
pub fn distance_map(rows: &[DistanceRow], store_ids: &[String], max_distance_km: u32) -> Figure {
    let mut data = Vec::new();

    for (i, store_id) in store_ids.iter().enumerate() {
        let orders: Vec<&DistanceRow> = rows.iter().filter(|r| &r.store_id == store_id).collect();
        let Some(first) = orders.first() else {
            continue;
        };
        let color = STORE_COLORS[i % STORE_COLORS.len()];

        data.push(markers(
            format!("Store {store_id} Orders ({})", orders.len()),
            orders
                .iter()
                .map(|r| GeoPoint::new(r.customer_lat, r.customer_lon))
                .collect(),
            orders
                .iter()
                .map(|r| {
                    format!(
                        "Order: ${:.0}<br>Distance: {:.2} km<br>Delivery: {} min<br>Store: {}",
                        r.order_value, r.distance_km, r.delivery_time_minutes, r.store_id
                    )
                })
                .collect(),
            json!({ "size": 8, "color": color, "opacity": 0.7 }),
        ));

        data.push(markers(
            format!("Store {store_id}"),
            vec![GeoPoint::new(first.store_lat, first.store_lon)],
            vec![format!(
                "Store: {store_id}<br>Location: {:.4}, {:.4}",
                first.store_lat, first.store_lon
            )],
            json!({ "size": 25, "color": color, "opacity": 0.9 }),
        ));
    }

    let center = if rows.is_empty() {
        BENGALURU_CENTER
    } else {
        let n = rows.len() as f64;
        GeoPoint::new(
            rows.iter().map(|r| r.store_lat).sum::<f64>() / n,
            rows.iter().map(|r| r.store_lon).sum::<f64>() / n,
        )
    };

    Figure {
        data,
        layout: map_layout(
            format!("ST_DISTANCE Analysis: Orders within {max_distance_km}km of Stores"),
            center,
            10.0,
            600,
        ),
    }
}

pub fn distance_histogram(rows: &[DistanceRow]) -> Figure {
    let x: Vec<f64> = rows.iter().map(|r| r.distance_km).collect();
    Figure {
        data: vec![json!({
            "type": "histogram",
            "x": x,
            "nbinsx": 20,
            "name": "Orders",
        })],
        layout: json!({
            "title": { "text": "Distance Distribution" },
            "xaxis": { "title": { "text": "Distance (km)" } },
            "yaxis": { "title": { "text": "Orders" } },
            "bargap": 0.05,
        }),
    }
}

/// Order value against distance, one trace per store.
pub fn distance_scatter(rows: &[DistanceRow], store_ids: &[String]) -> Figure {
    let data = store_ids
        .iter()
        .filter_map(|store_id| {
            let (x, y): (Vec<f64>, Vec<f64>) = rows
                .iter()
                .filter(|r| &r.store_id == store_id)
                .map(|r| (r.distance_km, r.order_value))
                .unzip();
            (!x.is_empty()).then(|| {
                json!({
                    "type": "scatter",
                    "mode": "markers",
                    "name": store_id,
                    "x": x,
                    "y": y,
                })
            })
        })
        .collect();

    Figure {
        data,
        layout: json!({
            "title": { "text": "Distance vs Order Value" },
            "xaxis": { "title": { "text": "Distance (km)" } },
            "yaxis": { "title": { "text": "Order Value ($)" } },
        }),
    }
}

// ---------------------------------------------------------------------------
// Zone containment
// ---------------------------------------------------------------------------

/// Zone outlines plus the customers found inside each zone.
pub fn containment_map(rows: &[ContainmentRow], zones: &[&ZoneRow]) -> Figure {
    let mut data = Vec::new();

    for (i, zone) in zones.iter().enumerate() {
        let color = ZONE_COLORS[i % ZONE_COLORS.len()];
        data.push(outline(
            format!("{} Boundary", zone.zone_name),
            &zone_boundary(zone),
            color,
            fill_for(color),
        ));
    }

    for (i, zone) in zones.iter().enumerate() {
        let color = ZONE_COLORS[i % ZONE_COLORS.len()];
        let customers: Vec<&ContainmentRow> =
            rows.iter().filter(|r| r.zone_id == zone.zone_id).collect();
        if customers.is_empty() {
            continue;
        }
        data.push(markers(
            format!("Customers in {}", zone.zone_name),
            customers
                .iter()
                .map(|r| GeoPoint::new(r.customer_lat, r.customer_lon))
                .collect(),
            customers
                .iter()
                .map(|r| {
                    format!(
                        "Zone: {}<br>Order: ${:.0}<br>Store: {}",
                        zone.zone_name, r.order_value, r.store_id
                    )
                })
                .collect(),
            json!({ "size": 8, "color": color, "opacity": 0.8 }),
        ));
    }

    let center = if zones.is_empty() {
        BENGALURU_CENTER
    } else {
        let n = zones.len() as f64;
        GeoPoint::new(
            zones.iter().map(|z| z.center_lat).sum::<f64>() / n,
            zones.iter().map(|z| z.center_lon).sum::<f64>() / n,
        )
    };

    Figure {
        data,
        layout: map_layout(
            "ST_CONTAINS Demo: Customers in Geographic Zones".to_string(),
            center,
            10.5,
            500,
        ),
    }
}

// ---------------------------------------------------------------------------
// Coverage
// ---------------------------------------------------------------------------

/// Coverage circle, its center, and customers split by `is_covered`.
pub fn coverage_map(rows: &[CoverageRow], filter: &CoverageFilter) -> Figure {
    let center = filter.center.point();
    let scenario = filter.scenario.label();
    let mut data = vec![
        outline(
            format!("{scenario} Area"),
            &circle_ring(center, filter.radius_km, CIRCLE_VERTICES),
            "blue",
            fill_for("blue"),
        ),
        markers(
            format!("Coverage Center: {}", filter.center.label()),
            vec![center],
            vec![filter.center.label().to_string()],
            json!({ "size": 15, "color": "blue" }),
        ),
    ];

    for (covered, name, color) in [(true, "Covered Customers", "green"), (false, "Not Covered", "red")] {
        let group: Vec<&CoverageRow> = rows.iter().filter(|r| r.is_covered == covered).collect();
        if group.is_empty() {
            continue;
        }
        data.push(markers(
            format!("{name} ({})", group.len()),
            group
                .iter()
                .map(|r| GeoPoint::new(r.customer_lat, r.customer_lon))
                .collect(),
            group
                .iter()
                .map(|r| format!("${:.0}<br>{} km", r.order_value, r.distance_km))
                .collect(),
            json!({ "size": 8, "color": color, "opacity": 0.7 }),
        ));
    }

    Figure {
        data,
        layout: map_layout(format!("ST_COVERS Demo: {scenario} Analysis"), center, 11.0, 500),
    }
}

#[cfg(test)]
mod tests {
    use geodemo_core::analysis::{CoverageCenter, CoverageScenario};

    use super::*;

    fn distance_row(store_id: &str, distance_km: f64) -> DistanceRow {
        DistanceRow {
            order_id: "ORD_000001".into(),
            store_id: store_id.into(),
            customer_lat: 12.93,
            customer_lon: 77.62,
            store_lat: 12.9279,
            store_lon: 77.6271,
            order_value: 250.0,
            delivery_time_minutes: 30,
            distance_km,
        }
    }

    #[test]
    fn distance_map_has_customer_and_store_trace_per_store_with_orders() {
        let rows = vec![distance_row("STORE_001", 1.0), distance_row("STORE_001", 2.0)];
        let stores = vec!["STORE_001".to_string(), "STORE_002".to_string()];

        let fig = distance_map(&rows, &stores, 8);

        assert_eq!(fig.data.len(), 2);
        assert_eq!(fig.data[0]["name"], "Store STORE_001 Orders (2)");
        assert_eq!(fig.data[0]["type"], "scattermap");
        assert_eq!(fig.data[1]["marker"]["size"], 25);
        assert_eq!(fig.layout["map"]["style"], "open-street-map");
        assert_eq!(fig.layout["map"]["center"]["lat"], 12.9279);
    }

    #[test]
    fn radius_zone_boundary_is_a_closed_circle() {
        let zone = ZoneRow {
            zone_id: "ZONE_001".into(),
            zone_name: "Central Business District".into(),
            zone_type: "commercial".into(),
            center_lat: 12.9716,
            center_lon: 77.5946,
            polygon_wkt: None,
            radius_km: Some(2.0),
        };
        let ring = zone_boundary(&zone);
        assert_eq!(ring.len(), CIRCLE_VERTICES + 1);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn unparseable_polygon_falls_back_to_center() {
        let zone = ZoneRow {
            zone_id: "ZONE_002".into(),
            zone_name: "Koramangala District".into(),
            zone_type: "mixed".into(),
            center_lat: 12.9279,
            center_lon: 77.6271,
            polygon_wkt: Some("MULTIPOLYGON EMPTY".into()),
            radius_km: None,
        };
        assert_eq!(zone_boundary(&zone), vec![GeoPoint::new(12.9279, 77.6271)]);
    }

    #[test]
    fn coverage_map_splits_covered_and_uncovered() {
        let row = |is_covered| CoverageRow {
            order_id: "ORD_000001".into(),
            customer_lat: 13.0,
            customer_lon: 77.6,
            order_value: 100.0,
            store_id: "STORE_001".into(),
            distance_km: 1.5,
            is_covered,
        };
        let filter = CoverageFilter {
            scenario: CoverageScenario::Emergency,
            center: CoverageCenter::North,
            radius_km: 3.0,
        };

        let fig = coverage_map(&[row(true), row(true), row(false)], &filter);

        assert_eq!(fig.data.len(), 4);
        assert_eq!(fig.data[0]["name"], "Emergency Response Coverage Area");
        assert_eq!(fig.data[2]["name"], "Covered Customers (2)");
        assert_eq!(fig.data[3]["name"], "Not Covered (1)");
        assert_eq!(fig.layout["map"]["zoom"], 11.0);
    }
}
