//! Dashboard filter selections and their validation rules.
//!
//! Each analysis page maps its form controls onto one of the filter structs
//! below. Filters are validated before any SQL is rendered from them.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::geo::GeoPoint;
use crate::stores::find_store;

// ---------------------------------------------------------------------------
// Control ranges
// ---------------------------------------------------------------------------

/// Maximum store-to-customer distance slider, in whole km.
pub const MAX_DISTANCE_KM_RANGE: (u32, u32) = (1, 15);
pub const DEFAULT_MAX_DISTANCE_KM: u32 = 8;

/// Minimum order value slider, in whole currency units.
pub const MIN_ORDER_VALUE_RANGE: (u32, u32) = (0, 500);
pub const DEFAULT_MIN_ORDER_VALUE: u32 = 50;

/// Coverage radius slider, in km with 0.5 km steps.
pub const COVERAGE_RADIUS_RANGE: (f64, f64) = (1.0, 10.0);
pub const COVERAGE_RADIUS_STEP: f64 = 0.5;
pub const DEFAULT_COVERAGE_RADIUS_KM: f64 = 5.0;

/// Number of stores / zones preselected when the page first loads.
pub const DEFAULT_SELECTION_COUNT: usize = 2;

const ZONE_ID_PATTERN: &str = r"^ZONE_\d{3}$";

static ZONE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ZONE_ID_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Store distance
// ---------------------------------------------------------------------------

/// Store Coverage Analysis: orders of the selected stores within a distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceFilter {
    pub store_ids: Vec<String>,
    pub max_distance_km: u32,
    pub min_order_value: u32,
}

impl DistanceFilter {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.store_ids.is_empty() {
            return Err(CoreError::Validation(
                "Please select at least one store".to_string(),
            ));
        }
        for id in &self.store_ids {
            if find_store(id).is_none() {
                return Err(CoreError::Validation(format!("Unknown store id '{id}'")));
            }
        }
        validate_whole_range(self.max_distance_km, MAX_DISTANCE_KM_RANGE, "max_distance_km")?;
        validate_whole_range(self.min_order_value, MIN_ORDER_VALUE_RANGE, "min_order_value")?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Zone containment
// ---------------------------------------------------------------------------

/// Customer Zone Analysis: orders whose customer lies inside the selected
/// zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainmentFilter {
    pub zone_ids: Vec<String>,
}

impl ContainmentFilter {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.zone_ids.is_empty() {
            return Err(CoreError::Validation(
                "Please select at least one zone".to_string(),
            ));
        }
        for id in &self.zone_ids {
            if !ZONE_ID_RE.is_match(id) {
                return Err(CoreError::Validation(format!(
                    "Invalid zone id '{id}', expected ZONE_ followed by three digits"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Service area coverage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageScenario {
    #[default]
    Delivery,
    Emergency,
    Sales,
}

impl CoverageScenario {
    pub const ALL: [CoverageScenario; 3] = [Self::Delivery, Self::Emergency, Self::Sales];

    pub fn label(self) -> &'static str {
        match self {
            Self::Delivery => "Delivery Zone Coverage",
            Self::Emergency => "Emergency Response Coverage",
            Self::Sales => "Sales Territory Coverage",
        }
    }
}

/// Fixed centers the coverage circle can be placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageCenter {
    #[default]
    Central,
    North,
    South,
    East,
    West,
}

impl CoverageCenter {
    pub const ALL: [CoverageCenter; 5] = [
        Self::Central,
        Self::North,
        Self::South,
        Self::East,
        Self::West,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Central => "Central Bangalore",
            Self::North => "North Bangalore",
            Self::South => "South Bangalore",
            Self::East => "East Bangalore",
            Self::West => "West Bangalore",
        }
    }

    pub fn point(self) -> GeoPoint {
        match self {
            Self::Central => GeoPoint::new(13.0, 77.6),
            Self::North => GeoPoint::new(13.1, 77.6),
            Self::South => GeoPoint::new(12.9, 77.6),
            Self::East => GeoPoint::new(13.0, 77.7),
            Self::West => GeoPoint::new(13.0, 77.5),
        }
    }
}

/// Service Area Coverage: which orders near a center fall inside a circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageFilter {
    pub scenario: CoverageScenario,
    pub center: CoverageCenter,
    pub radius_km: f64,
}

impl Default for CoverageFilter {
    fn default() -> Self {
        Self {
            scenario: CoverageScenario::default(),
            center: CoverageCenter::default(),
            radius_km: DEFAULT_COVERAGE_RADIUS_KM,
        }
    }
}

impl CoverageFilter {
    pub fn validate(&self) -> Result<(), CoreError> {
        let (min, max) = COVERAGE_RADIUS_RANGE;
        if !self.radius_km.is_finite() || !(min..=max).contains(&self.radius_km) {
            return Err(CoreError::Validation(format!(
                "radius_km must be between {min} and {max}, got {}",
                self.radius_km
            )));
        }
        let steps = self.radius_km / COVERAGE_RADIUS_STEP;
        if (steps - steps.round()).abs() > 1e-9 {
            return Err(CoreError::Validation(format!(
                "radius_km must be a multiple of {COVERAGE_RADIUS_STEP}, got {}",
                self.radius_km
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_whole_range(value: u32, (min, max): (u32, u32), name: &str) -> Result<(), CoreError> {
    if !(min..=max).contains(&value) {
        return Err(CoreError::Validation(format!(
            "{name} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}

/// Split a comma-separated selection (`a,b, c`) into trimmed, de-duplicated
/// ids, preserving first-seen order.
pub fn parse_selection(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for id in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !out.iter().any(|seen| seen == id) {
            out.push(id.to_string());
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn distance(ids: &[&str], km: u32, value: u32) -> DistanceFilter {
        DistanceFilter {
            store_ids: ids.iter().map(|s| s.to_string()).collect(),
            max_distance_km: km,
            min_order_value: value,
        }
    }

    #[test]
    fn distance_filter_accepts_defaults() {
        let f = distance(
            &["STORE_001", "STORE_002"],
            DEFAULT_MAX_DISTANCE_KM,
            DEFAULT_MIN_ORDER_VALUE,
        );
        assert!(f.validate().is_ok());
    }

    #[test]
    fn distance_filter_requires_a_store() {
        assert_matches!(distance(&[], 8, 50).validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn distance_filter_rejects_unknown_store() {
        assert_matches!(
            distance(&["STORE_001", "STORE_042"], 8, 50).validate(),
            Err(CoreError::Validation(msg)) if msg.contains("STORE_042")
        );
    }

    #[test]
    fn distance_filter_enforces_slider_bounds() {
        assert!(distance(&["STORE_001"], 1, 0).validate().is_ok());
        assert!(distance(&["STORE_001"], 15, 500).validate().is_ok());
        assert!(distance(&["STORE_001"], 0, 50).validate().is_err());
        assert!(distance(&["STORE_001"], 16, 50).validate().is_err());
        assert!(distance(&["STORE_001"], 8, 501).validate().is_err());
    }

    #[test]
    fn containment_filter_checks_zone_id_shape() {
        let ok = ContainmentFilter {
            zone_ids: vec!["ZONE_001".into(), "ZONE_010".into()],
        };
        assert!(ok.validate().is_ok());

        let injected = ContainmentFilter {
            zone_ids: vec!["ZONE_001' OR '1'='1".into()],
        };
        assert!(injected.validate().is_err());

        let empty = ContainmentFilter { zone_ids: vec![] };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn coverage_radius_bounds_and_step() {
        let mut f = CoverageFilter::default();
        assert!(f.validate().is_ok());

        f.radius_km = 1.0;
        assert!(f.validate().is_ok());
        f.radius_km = 10.0;
        assert!(f.validate().is_ok());
        f.radius_km = 7.5;
        assert!(f.validate().is_ok());

        f.radius_km = 0.5;
        assert!(f.validate().is_err());
        f.radius_km = 10.5;
        assert!(f.validate().is_err());
        f.radius_km = 2.25;
        assert!(f.validate().is_err());
        f.radius_km = f64::NAN;
        assert!(f.validate().is_err());
    }

    #[test]
    fn coverage_centers_are_distinct() {
        for (i, a) in CoverageCenter::ALL.iter().enumerate() {
            for b in &CoverageCenter::ALL[i + 1..] {
                assert_ne!(a.point(), b.point());
            }
        }
    }

    #[test]
    fn selection_parsing_trims_and_dedups() {
        assert_eq!(
            parse_selection(" STORE_002,STORE_001 ,,STORE_002"),
            vec!["STORE_002".to_string(), "STORE_001".to_string()]
        );
        assert!(parse_selection("").is_empty());
    }
}
