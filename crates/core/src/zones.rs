//! Geographic zones used to segment customers.
//!
//! A zone is persisted either as a center with a radius or as a polygon
//! boundary in WKT, depending on which `geo_zones` schema variant is in use.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::geo::{circle_ring, polygon_wkt, GeoPoint, CIRCLE_VERTICES};

// ---------------------------------------------------------------------------
// Zone type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneType {
    Commercial,
    Mixed,
    Residential,
    Technology,
    Industrial,
}

impl ZoneType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Commercial => "commercial",
            Self::Mixed => "mixed",
            Self::Residential => "residential",
            Self::Technology => "technology",
            Self::Industrial => "industrial",
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Schema variant
// ---------------------------------------------------------------------------

/// Which column layout the `geo_zones` table uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneSchema {
    /// `center_lat, center_lon, polygon_wkt`
    #[default]
    Polygon,
    /// `zone_lat, zone_lon, zone_radius`
    Radius,
}

impl FromStr for ZoneSchema {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "polygon" => Ok(Self::Polygon),
            "radius" => Ok(Self::Radius),
            other => Err(CoreError::Validation(format!(
                "Unknown zone schema '{other}', expected 'polygon' or 'radius'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Zone
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZoneShape {
    Circle { center: GeoPoint, radius_km: f64 },
    Polygon { center: GeoPoint, wkt: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Zone {
    pub zone_id: String,
    pub zone_name: String,
    pub zone_type: ZoneType,
    pub shape: ZoneShape,
}

impl Zone {
    pub fn center(&self) -> GeoPoint {
        match &self.shape {
            ZoneShape::Circle { center, .. } | ZoneShape::Polygon { center, .. } => *center,
        }
    }

    /// Convert a circular zone into its polygon form; polygons are returned
    /// unchanged.
    pub fn into_polygon(self) -> Zone {
        match self.shape {
            ZoneShape::Circle { center, radius_km } => Zone {
                shape: ZoneShape::Polygon {
                    center,
                    wkt: polygon_wkt(&circle_ring(center, radius_km, CIRCLE_VERTICES)),
                },
                ..self
            },
            ZoneShape::Polygon { .. } => self,
        }
    }

    /// Shape the zone for the given schema variant.
    ///
    /// Polygon zones cannot be stored in the radius layout.
    pub fn for_schema(self, schema: ZoneSchema) -> Result<Zone, CoreError> {
        match schema {
            ZoneSchema::Polygon => Ok(self.into_polygon()),
            ZoneSchema::Radius => match self.shape {
                ZoneShape::Circle { .. } => Ok(self),
                ZoneShape::Polygon { .. } => Err(CoreError::Validation(format!(
                    "Zone {} has a polygon boundary and no radius",
                    self.zone_id
                ))),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Seed zones
// ---------------------------------------------------------------------------

struct ZoneSeed {
    id: &'static str,
    name: &'static str,
    zone_type: ZoneType,
    lat: f64,
    lon: f64,
    radius_km: f64,
}

const ZONE_SEEDS: &[ZoneSeed] = &[
    ZoneSeed { id: "ZONE_001", name: "Central Business District", zone_type: ZoneType::Commercial, lat: 12.9716, lon: 77.5946, radius_km: 2.0 },
    ZoneSeed { id: "ZONE_002", name: "Koramangala District", zone_type: ZoneType::Mixed, lat: 12.9279, lon: 77.6271, radius_km: 1.5 },
    ZoneSeed { id: "ZONE_003", name: "Indiranagar District", zone_type: ZoneType::Residential, lat: 12.9784, lon: 77.6408, radius_km: 1.2 },
    ZoneSeed { id: "ZONE_004", name: "Whitefield Tech Hub", zone_type: ZoneType::Technology, lat: 12.9698, lon: 77.7500, radius_km: 2.5 },
    ZoneSeed { id: "ZONE_005", name: "Electronic City", zone_type: ZoneType::Technology, lat: 12.8456, lon: 77.6603, radius_km: 3.0 },
    ZoneSeed { id: "ZONE_006", name: "JP Nagar Residential", zone_type: ZoneType::Residential, lat: 12.9083, lon: 77.5833, radius_km: 1.8 },
    ZoneSeed { id: "ZONE_007", name: "HSR Layout", zone_type: ZoneType::Residential, lat: 12.9116, lon: 77.6473, radius_km: 1.5 },
    ZoneSeed { id: "ZONE_008", name: "Marathahalli Area", zone_type: ZoneType::Mixed, lat: 12.9591, lon: 77.6974, radius_km: 2.0 },
    ZoneSeed { id: "ZONE_009", name: "North Bengaluru", zone_type: ZoneType::Industrial, lat: 13.1500, lon: 77.6000, radius_km: 4.0 },
    ZoneSeed { id: "ZONE_010", name: "South Bengaluru", zone_type: ZoneType::Residential, lat: 12.8500, lon: 77.6000, radius_km: 3.5 },
];

/// The ten fixed Bengaluru zones in their center-plus-radius form.
pub fn seed_zones() -> Vec<Zone> {
    ZONE_SEEDS
        .iter()
        .map(|seed| Zone {
            zone_id: seed.id.to_string(),
            zone_name: seed.name.to_string(),
            zone_type: seed.zone_type,
            shape: ZoneShape::Circle {
                center: GeoPoint::new(seed.lat, seed.lon),
                radius_km: seed.radius_km,
            },
        })
        .collect()
}
