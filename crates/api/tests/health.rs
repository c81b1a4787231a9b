//! Integration tests for the root-level health check and routing basics.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, FakeExecutor, Reply};

// ---------------------------------------------------------------------------
// Test: health reports ok when Firebolt answers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_ok_when_database_answers() {
    let db = Arc::new(FakeExecutor::new());
    let app = build_test_app(db.clone());

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(db.executed(), vec!["SELECT 1".to_string()]);
}

// ---------------------------------------------------------------------------
// Test: health degrades instead of failing when Firebolt is unreachable
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_degraded_without_credentials() {
    let app = build_test_app(Arc::new(FakeExecutor::offline()));

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

#[tokio::test]
async fn health_degraded_when_statement_rejected() {
    let db = FakeExecutor::new().on("SELECT 1", Reply::Rejected("engine is stopped"));
    let app = build_test_app(Arc::new(db));

    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["status"], "degraded");
}

// ---------------------------------------------------------------------------
// Test: responses carry a request id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn responses_carry_request_id() {
    let app = build_test_app(Arc::new(FakeExecutor::new()));

    let response = get(app, "/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}

// ---------------------------------------------------------------------------
// Test: unknown API routes are 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_api_route_is_not_found() {
    let app = build_test_app(Arc::new(FakeExecutor::new()));

    let response = get(app, "/api/v1/analysis/nearest").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: the dashboard page is served from the static directory
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_serves_dashboard() {
    let app = build_test_app(Arc::new(FakeExecutor::new()));

    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = common::body_text(response).await;
    assert!(html.contains("Firebolt Geospatial Demo"));
    assert!(html.contains("Avg Delivery Time"));
}
