//! Presentation geometry: points, the Bengaluru bounding box, and the
//! degree-based circle outlines used for map overlays and WKT boundaries.
//!
//! No distance or containment predicate is evaluated here; those run inside
//! the database via `ST_DISTANCE` / `ST_CONTAINS` / `ST_COVERS`.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Kilometres per degree of latitude (and of longitude at the equator).
pub const KM_PER_DEGREE: f64 = 111.32;

/// Number of vertices used when approximating a circle as a ring.
pub const CIRCLE_VERTICES: usize = 64;

/// Bounding box that every generated customer location is clamped into.
pub const BENGALURU_BOUNDS: BoundingBox = BoundingBox {
    lat_min: 12.8,
    lat_max: 13.2,
    lon_min: 77.4,
    lon_max: 77.8,
};

/// Default map center (city center).
pub const BENGALURU_CENTER: GeoPoint = GeoPoint {
    lat: 12.9716,
    lon: 77.5946,
};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Axis-aligned latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// Box extending `half_deg` degrees on every side of `center`.
    pub fn around(center: GeoPoint, half_deg: f64) -> Self {
        Self {
            lat_min: center.lat - half_deg,
            lat_max: center.lat + half_deg,
            lon_min: center.lon - half_deg,
            lon_max: center.lon + half_deg,
        }
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.lat_min..=self.lat_max).contains(&point.lat)
            && (self.lon_min..=self.lon_max).contains(&point.lon)
    }

    /// Clamp a point onto the box edges.
    pub fn clamp(&self, point: GeoPoint) -> GeoPoint {
        GeoPoint {
            lat: point.lat.clamp(self.lat_min, self.lat_max),
            lon: point.lon.clamp(self.lon_min, self.lon_max),
        }
    }
}

// ---------------------------------------------------------------------------
// Circle outlines
// ---------------------------------------------------------------------------

/// Latitude and longitude spans (in degrees) of a radius around `center`.
pub fn radius_in_degrees(center: GeoPoint, radius_km: f64) -> (f64, f64) {
    let lat_offset = radius_km / KM_PER_DEGREE;
    let lon_offset = radius_km / (KM_PER_DEGREE * center.lat.to_radians().cos());
    (lat_offset, lon_offset)
}

/// Closed ring of `vertices + 1` points approximating a circle.
///
/// The first and last points are identical so the ring can be used both as
/// a Plotly `fill: toself` trace and as a WKT polygon shell.
pub fn circle_ring(center: GeoPoint, radius_km: f64, vertices: usize) -> Vec<GeoPoint> {
    let (lat_offset, lon_offset) = radius_in_degrees(center, radius_km);
    let n = vertices.max(3);

    let mut ring: Vec<GeoPoint> = (0..n)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
            GeoPoint {
                lat: center.lat + lat_offset * angle.sin(),
                lon: center.lon + lon_offset * angle.cos(),
            }
        })
        .collect();
    ring.push(ring[0]);
    ring
}

/// Render a closed ring as WKT, `POLYGON((lon lat, ...))`.
pub fn polygon_wkt(ring: &[GeoPoint]) -> String {
    let coords: Vec<String> = ring
        .iter()
        .map(|p| format!("{:.6} {:.6}", p.lon, p.lat))
        .collect();
    format!("POLYGON(({}))", coords.join(", "))
}

/// Parse the outer shell of a `POLYGON((...))` WKT string.
///
/// Only the simple single-shell form written by the generator is accepted;
/// anything else yields `None` and the caller falls back to the zone center.
pub fn parse_polygon_wkt(wkt: &str) -> Option<Vec<GeoPoint>> {
    let body = wkt.trim();
    let body = body
        .strip_prefix("POLYGON")
        .or_else(|| body.strip_prefix("polygon"))?
        .trim();
    let body = body.strip_prefix("((")?.strip_suffix("))")?;

    body.split(',')
        .map(|pair| {
            let mut parts = pair.split_whitespace();
            let lon = parts.next()?.parse::<f64>().ok()?;
            let lat = parts.next()?.parse::<f64>().ok()?;
            Some(GeoPoint { lat, lon })
        })
        .collect()
}

/// Area of a circle in km², shown beside the coverage controls.
pub fn circle_area_km2(radius_km: f64) -> f64 {
    std::f64::consts::PI * radius_km * radius_km
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
