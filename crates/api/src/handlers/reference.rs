//! Handlers for static reference content: the functions table and the
//! option lists the dashboard builds its controls from.

use axum::Json;
use geodemo_core::analysis::{
    CoverageCenter, CoverageScenario, COVERAGE_RADIUS_RANGE, COVERAGE_RADIUS_STEP,
    DEFAULT_COVERAGE_RADIUS_KM, DEFAULT_MAX_DISTANCE_KM, DEFAULT_MIN_ORDER_VALUE,
    MAX_DISTANCE_KM_RANGE, MIN_ORDER_VALUE_RANGE,
};
use geodemo_core::geo::GeoPoint;
use geodemo_core::reference::{FunctionReference, FUNCTIONS};
use serde::Serialize;

use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct Slider<T: Serialize> {
    pub min: T,
    pub max: T,
    pub step: T,
    pub default: T,
}

#[derive(Debug, Serialize)]
pub struct Choice<T: Serialize> {
    pub value: T,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CenterChoice {
    pub value: CoverageCenter,
    pub label: &'static str,
    pub point: GeoPoint,
}

#[derive(Debug, Serialize)]
pub struct Controls {
    pub max_distance_km: Slider<u32>,
    pub min_order_value: Slider<u32>,
    pub radius_km: Slider<f64>,
    pub scenarios: Vec<Choice<CoverageScenario>>,
    pub centers: Vec<CenterChoice>,
}

/// GET /api/v1/reference/functions
pub async fn functions() -> Json<DataResponse<&'static [FunctionReference]>> {
    Json(DataResponse { data: FUNCTIONS })
}

/// GET /api/v1/reference/controls
pub async fn controls() -> Json<DataResponse<Controls>> {
    let (distance_min, distance_max) = MAX_DISTANCE_KM_RANGE;
    let (value_min, value_max) = MIN_ORDER_VALUE_RANGE;
    let (radius_min, radius_max) = COVERAGE_RADIUS_RANGE;

    Json(DataResponse {
        data: Controls {
            max_distance_km: Slider {
                min: distance_min,
                max: distance_max,
                step: 1,
                default: DEFAULT_MAX_DISTANCE_KM,
            },
            min_order_value: Slider {
                min: value_min,
                max: value_max,
                step: 1,
                default: DEFAULT_MIN_ORDER_VALUE,
            },
            radius_km: Slider {
                min: radius_min,
                max: radius_max,
                step: COVERAGE_RADIUS_STEP,
                default: DEFAULT_COVERAGE_RADIUS_KM,
            },
            scenarios: CoverageScenario::ALL
                .into_iter()
                .map(|value| Choice { value, label: value.label() })
                .collect(),
            centers: CoverageCenter::ALL
                .into_iter()
                .map(|value| CenterChoice {
                    value,
                    label: value.label(),
                    point: value.point(),
                })
                .collect(),
        },
    })
}
