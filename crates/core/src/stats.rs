//! Summary metrics over the transient result sets shown on each page.

use std::collections::HashSet;

use serde::Serialize;

use crate::geo::round_to;
use crate::queries::{ContainmentRow, CoverageRow, DistanceRow};

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

// ---------------------------------------------------------------------------
// Store distance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceSummary {
    pub total_orders: usize,
    pub total_revenue: f64,
    pub avg_distance_km: f64,
    pub closest_distance_km: f64,
    pub avg_delivery_minutes: f64,
    pub avg_order_value: f64,
}

/// Per-store breakdown row ("Store Performance by Distance").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorePerformance {
    pub store_id: String,
    pub order_count: usize,
    pub total_revenue: f64,
    pub avg_order_value: f64,
    pub avg_distance_km: f64,
    pub min_distance_km: f64,
    pub max_distance_km: f64,
    pub avg_delivery_minutes: f64,
}

pub fn summarize_distance(rows: &[DistanceRow]) -> DistanceSummary {
    DistanceSummary {
        total_orders: rows.len(),
        total_revenue: round_to(rows.iter().map(|r| r.order_value).sum(), 2),
        avg_distance_km: round_to(mean(rows.iter().map(|r| r.distance_km)), 2),
        closest_distance_km: rows
            .iter()
            .map(|r| r.distance_km)
            .reduce(f64::min)
            .map_or(0.0, |d| round_to(d, 2)),
        avg_delivery_minutes: round_to(
            mean(rows.iter().map(|r| f64::from(r.delivery_time_minutes))),
            1,
        ),
        avg_order_value: round_to(mean(rows.iter().map(|r| r.order_value)), 2),
    }
}

/// Group rows by store, in order of first appearance.
pub fn store_performance(rows: &[DistanceRow]) -> Vec<StorePerformance> {
    let mut store_ids: Vec<&str> = Vec::new();
    for row in rows {
        if !store_ids.contains(&row.store_id.as_str()) {
            store_ids.push(&row.store_id);
        }
    }

    store_ids
        .into_iter()
        .map(|store_id| {
            let group: Vec<&DistanceRow> = rows.iter().filter(|r| r.store_id == store_id).collect();
            let distances = || group.iter().map(|r| r.distance_km);
            StorePerformance {
                store_id: store_id.to_string(),
                order_count: group.len(),
                total_revenue: round_to(group.iter().map(|r| r.order_value).sum(), 2),
                avg_order_value: round_to(mean(group.iter().map(|r| r.order_value)), 2),
                avg_distance_km: round_to(mean(distances()), 2),
                min_distance_km: round_to(distances().fold(f64::INFINITY, f64::min), 2),
                max_distance_km: round_to(distances().fold(f64::NEG_INFINITY, f64::max), 2),
                avg_delivery_minutes: round_to(
                    mean(group.iter().map(|r| f64::from(r.delivery_time_minutes))),
                    2,
                ),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Zone containment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneCount {
    pub zone_id: String,
    pub zone_name: String,
    pub customers: usize,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainmentSummary {
    pub customers_found: usize,
    pub total_revenue: f64,
    pub avg_order_value: f64,
    pub by_zone: Vec<ZoneCount>,
}

/// Headline metrics count each order once, even when it lies in several
/// selected zones; `by_zone` counts it in every zone that contains it.
pub fn summarize_containment(rows: &[ContainmentRow]) -> ContainmentSummary {
    let mut by_zone: Vec<ZoneCount> = Vec::new();
    for row in rows {
        match by_zone.iter_mut().find(|z| z.zone_id == row.zone_id) {
            Some(entry) => {
                entry.customers += 1;
                entry.revenue += row.order_value;
            }
            None => by_zone.push(ZoneCount {
                zone_id: row.zone_id.clone(),
                zone_name: row.zone_name.clone(),
                customers: 1,
                revenue: row.order_value,
            }),
        }
    }
    for entry in &mut by_zone {
        entry.revenue = round_to(entry.revenue, 2);
    }

    let mut seen = HashSet::new();
    let orders: Vec<&ContainmentRow> = rows
        .iter()
        .filter(|r| seen.insert(r.order_id.as_str()))
        .collect();

    ContainmentSummary {
        customers_found: orders.len(),
        total_revenue: round_to(orders.iter().map(|r| r.order_value).sum(), 2),
        avg_order_value: round_to(mean(orders.iter().map(|r| r.order_value)), 2),
        by_zone,
    }
}

// ---------------------------------------------------------------------------
// Coverage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageSummary {
    pub total_customers: usize,
    pub covered_customers: usize,
    pub coverage_rate_pct: f64,
    pub covered_revenue: f64,
    pub area_km2: f64,
}

pub fn summarize_coverage(rows: &[CoverageRow], radius_km: f64) -> CoverageSummary {
    let covered: Vec<&CoverageRow> = rows.iter().filter(|r| r.is_covered).collect();
    let rate = if rows.is_empty() {
        0.0
    } else {
        covered.len() as f64 / rows.len() as f64 * 100.0
    };

    CoverageSummary {
        total_customers: rows.len(),
        covered_customers: covered.len(),
        coverage_rate_pct: round_to(rate, 1),
        covered_revenue: round_to(covered.iter().map(|r| r.order_value).sum(), 2),
        area_km2: round_to(crate::geo::circle_area_km2(radius_km), 1),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
