//! Query parameter types for the analysis endpoints.
//!
//! Every parameter is optional; missing ones fall back to the dashboard's
//! default control values.

use geodemo_core::analysis::{
    parse_selection, CoverageCenter, CoverageFilter, CoverageScenario, DEFAULT_SELECTION_COUNT,
};
use serde::Deserialize;

/// `?stores=STORE_001,STORE_002&max_distance_km=8&min_order_value=50`
#[derive(Debug, Default, Deserialize)]
pub struct DistanceParams {
    pub stores: Option<String>,
    pub max_distance_km: Option<u32>,
    pub min_order_value: Option<u32>,
}

/// `?zones=ZONE_001,ZONE_002`
#[derive(Debug, Default, Deserialize)]
pub struct ContainmentParams {
    pub zones: Option<String>,
}

/// `?scenario=delivery&center=north&radius_km=3.5`
#[derive(Debug, Default, Deserialize)]
pub struct CoverageParams {
    pub scenario: Option<CoverageScenario>,
    pub center: Option<CoverageCenter>,
    pub radius_km: Option<f64>,
}

impl CoverageParams {
    pub fn into_filter(self) -> CoverageFilter {
        let defaults = CoverageFilter::default();
        CoverageFilter {
            scenario: self.scenario.unwrap_or(defaults.scenario),
            center: self.center.unwrap_or(defaults.center),
            radius_km: self.radius_km.unwrap_or(defaults.radius_km),
        }
    }
}

/// Resolve a comma-separated selection against the ids on offer.
///
/// An absent parameter selects the first few available ids; an explicit
/// empty value selects nothing so validation can reject it.
pub fn resolve_selection(raw: Option<&str>, available: &[String]) -> Vec<String> {
    match raw {
        Some(raw) => parse_selection(raw),
        None => available
            .iter()
            .take(DEFAULT_SELECTION_COUNT)
            .cloned()
            .collect(),
    }
}
