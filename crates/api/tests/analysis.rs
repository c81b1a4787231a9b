//! Integration tests for the three analysis endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, build_test_app_with, distance_rows, get, seeded, seeded_executor,
    test_config, FakeExecutor, Reply, CONTAINMENT_QUERY, COVERAGE_QUERY, DISTANCE_QUERY,
};
use geodemo_api::config::ServerConfig;
use geodemo_core::zones::ZoneSchema;

fn last_statement(db: &FakeExecutor) -> String {
    db.executed().last().cloned().unwrap()
}

// ---------------------------------------------------------------------------
// Test: store distance with default controls
// ---------------------------------------------------------------------------

#[tokio::test]
async fn distance_defaults_select_first_two_stores() {
    let db = Arc::new(seeded_executor());
    let app = build_test_app(db.clone());

    let response = get(app, "/api/v1/analysis/distance").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["filter"]["store_ids"], serde_json::json!(["STORE_001", "STORE_002"]));
    assert_eq!(data["filter"]["max_distance_km"], 8);
    assert_eq!(data["filter"]["min_order_value"], 50);
    assert_eq!(data["summary"]["total_orders"], 12);
    assert_eq!(data["store_performance"][0]["store_id"], "STORE_001");
    assert!(data["notice"].is_null());

    // More than ten rows: every figure is present.
    assert!(!data["map"]["data"].as_array().unwrap().is_empty());
    assert!(data["histogram"].is_object());
    assert!(data["scatter"].is_object());

    let sql = last_statement(&db);
    assert_eq!(data["sql"], sql.as_str());
    assert!(sql.contains("ST_DISTANCE("));
    assert!(sql.contains("store_id IN ('STORE_001', 'STORE_002')"));
    assert!(sql.contains("<= 8000"));
    assert!(data["reference_sql"].as_str().unwrap().contains("ST_DISTANCE"));
}

#[tokio::test]
async fn distance_explicit_controls_reach_the_statement() {
    let db = Arc::new(seeded_executor());
    let app = build_test_app(db.clone());

    let response = get(
        app,
        "/api/v1/analysis/distance?stores=STORE_005&max_distance_km=3&min_order_value=200",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let sql = last_statement(&db);
    assert!(sql.contains("store_id IN ('STORE_005')"));
    assert!(sql.contains("order_value >= 200"));
    assert!(sql.contains("<= 3000"));
}

#[tokio::test]
async fn distance_few_rows_skip_charts_but_keep_map() {
    let db = seeded_executor_with(DISTANCE_QUERY, distance_rows(4));
    let app = build_test_app(Arc::new(db));

    let json = body_json(get(app, "/api/v1/analysis/distance").await).await;
    let data = &json["data"];
    assert!(data["map"].is_object());
    assert!(data["histogram"].is_null());
    assert!(data["scatter"].is_null());
}

#[tokio::test]
async fn distance_without_matches_returns_notice() {
    let db = seeded_executor_with(DISTANCE_QUERY, distance_rows(0));
    let app = build_test_app(Arc::new(db));

    let response = get(app, "/api/v1/analysis/distance?max_distance_km=2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["notice"], "No orders found within 2km of selected stores");
    assert!(data["map"].is_null());
    assert_eq!(data["summary"]["total_orders"], 0);
}

// ---------------------------------------------------------------------------
// Test: store distance validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn distance_out_of_range_is_validation_error() {
    let db = Arc::new(seeded_executor());
    let app = build_test_app(db.clone());

    let response = get(app, "/api/v1/analysis/distance?max_distance_km=40").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("max_distance_km"));
    assert!(!db.executed().iter().any(|sql| sql.contains("ST_DISTANCE")));
}

#[tokio::test]
async fn distance_empty_selection_is_validation_error() {
    let app = build_test_app(Arc::new(seeded_executor()));

    let response = get(app, "/api/v1/analysis/distance?stores=").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Please select at least one store");
}

#[tokio::test]
async fn distance_rejects_injected_store_id() {
    let db = Arc::new(seeded_executor());
    let app = build_test_app(db.clone());

    let response = get(app, "/api/v1/analysis/distance?stores=STORE_001%27%20OR%201%3D1--").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!db.executed().iter().any(|sql| sql.contains("OR 1=1")));
}

#[tokio::test]
async fn distance_rejected_statement_is_bad_gateway() {
    let db = seeded_executor_with(DISTANCE_QUERY, Reply::Rejected("Function ST_DISTANCE failed"));
    let app = build_test_app(Arc::new(db));

    let response = get(app, "/api/v1/analysis/distance").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "QUERY_FAILED");
    assert!(json["error"].as_str().unwrap().contains("ST_DISTANCE failed"));
}

// ---------------------------------------------------------------------------
// Test: zone containment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn containment_defaults_to_first_two_zones() {
    let db = Arc::new(seeded_executor());
    let app = build_test_app(db.clone());

    let response = get(app, "/api/v1/analysis/containment").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["filter"]["zone_ids"], serde_json::json!(["ZONE_001", "ZONE_007"]));
    assert_eq!(data["summary"]["customers_found"], 3);
    assert!(data["map"].is_object());

    let sql = last_statement(&db);
    assert!(sql.contains("ST_CONTAINS(ST_GEOGFROMTEXT(z.polygon_wkt)"));
    assert!(sql.contains("z.zone_id IN ('ZONE_001', 'ZONE_007')"));
}

#[tokio::test]
async fn containment_unknown_zone_is_not_found() {
    let app = build_test_app(Arc::new(seeded_executor()));

    let response = get(app, "/api/v1/analysis/containment?zones=ZONE_001,ZONE_042").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Zone with id ZONE_042 not found");
}

#[tokio::test]
async fn containment_malformed_zone_id_is_validation_error() {
    let app = build_test_app(Arc::new(seeded_executor()));

    let response = get(app, "/api/v1/analysis/containment?zones=zone-1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn containment_uses_distance_for_radius_zones() {
    let db = Arc::new(seeded_executor());
    let config = ServerConfig {
        zone_schema: ZoneSchema::Radius,
        ..test_config()
    };
    let app = build_test_app_with(db.clone(), config);

    // The fixture zones still decode: radius is optional on the row shape.
    let response = get(app, "/api/v1/analysis/containment?zones=ZONE_001").await;
    assert_eq!(response.status(), StatusCode::OK);

    let sql = last_statement(&db);
    assert!(sql.contains("z.zone_radius * 1000"));
    assert!(!sql.contains("ST_CONTAINS"));
}

#[tokio::test]
async fn containment_without_matches_returns_notice() {
    let db = seeded_executor_with(CONTAINMENT_QUERY, common::result_set(&[], vec![]));
    let app = build_test_app(Arc::new(db));

    let json = body_json(get(app, "/api/v1/analysis/containment").await).await;
    assert_eq!(json["data"]["notice"], "No customers found in selected zones");
    assert!(json["data"]["map"].is_null());
}

// ---------------------------------------------------------------------------
// Test: service coverage
// ---------------------------------------------------------------------------

#[tokio::test]
async fn coverage_defaults() {
    let db = Arc::new(seeded_executor());
    let app = build_test_app(db.clone());

    let response = get(app, "/api/v1/analysis/coverage").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["filter"]["scenario"], "delivery");
    assert_eq!(data["filter"]["center"], "central");
    assert_eq!(data["filter"]["radius_km"], 5.0);
    assert_eq!(data["center"]["lat"], 13.0);
    assert_eq!(data["summary"]["total_customers"], 3);
    assert_eq!(data["summary"]["covered_customers"], 2);
    assert!(data["service_area_wkt"].as_str().unwrap().starts_with("POLYGON(("));

    let sql = last_statement(&db);
    assert!(sql.contains("ST_COVERS(ST_GEOGFROMTEXT('POLYGON(("));
    assert!(data["reference_sql"].as_str().unwrap().contains("ST_COVERS"));
}

#[tokio::test]
async fn coverage_explicit_center_and_radius() {
    let db = Arc::new(seeded_executor());
    let app = build_test_app(db.clone());

    let response = get(
        app,
        "/api/v1/analysis/coverage?scenario=emergency&center=north&radius_km=2.5",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["filter"]["scenario"], "emergency");
    assert_eq!(json["data"]["center"]["lat"], 13.1);
    let legend: Vec<String> = json["data"]["map"]["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|trace| trace["name"].as_str().map(str::to_string))
        .collect();
    assert!(legend.iter().any(|name| name == "Emergency Response Coverage Area"));
}

#[tokio::test]
async fn coverage_radius_off_step_is_validation_error() {
    let app = build_test_app(Arc::new(seeded_executor()));

    let response = get(app, "/api/v1/analysis/coverage?radius_km=2.3").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn coverage_unknown_center_is_rejected() {
    let app = build_test_app(Arc::new(seeded_executor()));

    let response = get(app, "/api/v1/analysis/coverage?center=atlantis").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn coverage_without_rows_returns_notice() {
    let db = seeded_executor_with(COVERAGE_QUERY, common::result_set(&[], vec![]));
    let app = build_test_app(Arc::new(db));

    let json = body_json(get(app, "/api/v1/analysis/coverage").await).await;
    assert_eq!(json["data"]["notice"], "No customer data found in the selected area");
    assert_eq!(json["data"]["summary"]["coverage_rate_pct"], 0.0);
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The seeded fake with one reply overridden.
fn seeded_executor_with(snippet: &'static str, reply: Reply) -> FakeExecutor {
    seeded(FakeExecutor::new().on(snippet, reply))
}
