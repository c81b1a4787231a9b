#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use geodemo_api::config::ServerConfig;
use geodemo_api::router::build_app_router;
use geodemo_api::state::AppState;
use geodemo_core::zones::ZoneSchema;
use geodemo_db::{ColumnMeta, DbError, QueryExecutor, ResultSet};

// ---------------------------------------------------------------------------
// Fake Firebolt
// ---------------------------------------------------------------------------

/// Canned outcome for statements containing a given snippet.
#[derive(Clone)]
pub enum Reply {
    Rows(ResultSet),
    /// The engine rejected the statement.
    Rejected(&'static str),
    /// The engine refused the token (expired, revoked or no grant).
    Unauthorized,
    /// No credentials configured.
    Offline,
}

/// In-memory [`QueryExecutor`] answering by substring match, first match
/// wins. Unmatched statements get an empty result set.
#[derive(Default)]
pub struct FakeExecutor {
    replies: Vec<(&'static str, Reply)>,
    pub statements: Mutex<Vec<String>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, snippet: &'static str, reply: Reply) -> Self {
        self.replies.push((snippet, reply));
        self
    }

    /// Every statement fails as if credentials were missing.
    pub fn offline() -> Self {
        Self::new().on("", Reply::Offline)
    }

    pub fn executed(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for FakeExecutor {
    async fn execute(&self, sql: &str) -> Result<ResultSet, DbError> {
        self.statements.lock().unwrap().push(sql.to_string());
        let reply = self
            .replies
            .iter()
            .find(|(snippet, _)| sql.contains(snippet))
            .map(|(_, reply)| reply.clone());
        match reply {
            Some(Reply::Rows(set)) => Ok(set),
            Some(Reply::Rejected(body)) => Err(DbError::Api {
                status: 400,
                body: body.to_string(),
            }),
            Some(Reply::Unauthorized) => Err(DbError::Api {
                status: 401,
                body: "Unauthorized".to_string(),
            }),
            Some(Reply::Offline) => Err(DbError::MissingCredentials),
            None => Ok(ResultSet::default()),
        }
    }
}

// ---------------------------------------------------------------------------
// Canned result sets
// ---------------------------------------------------------------------------

pub const ORDERS_COUNT: &str = "row_count FROM customer_orders";
pub const ZONES_COUNT: &str = "row_count FROM geo_zones";
pub const STORES_QUERY: &str = "SELECT DISTINCT store_id";
pub const ZONES_QUERY: &str = "ORDER BY zone_name";
pub const DISTANCE_QUERY: &str = "ORDER BY store_id, distance_km";
pub const CONTAINMENT_QUERY: &str = "CROSS JOIN geo_zones";
pub const COVERAGE_QUERY: &str = "ST_COVERS";

pub fn result_set(columns: &[(&str, &str)], rows: Vec<Vec<Value>>) -> Reply {
    Reply::Rows(ResultSet::new(
        columns
            .iter()
            .map(|(name, ty)| ColumnMeta {
                name: name.to_string(),
                ty: ty.to_string(),
            })
            .collect(),
        rows,
    ))
}

pub fn count(n: i64) -> Reply {
    result_set(&[("row_count", "long")], vec![vec![json!(n)]])
}

pub fn stores() -> Reply {
    result_set(
        &[("store_id", "text"), ("store_lat", "double"), ("store_lon", "double")],
        vec![
            vec![json!("STORE_001"), json!(12.9279), json!(77.6271)],
            vec![json!("STORE_002"), json!(12.9784), json!(77.6408)],
            vec![json!("STORE_003"), json!(12.9698), json!(77.75)],
        ],
    )
}

pub fn zones() -> Reply {
    result_set(
        &[
            ("zone_id", "text"),
            ("zone_name", "text"),
            ("zone_type", "text"),
            ("center_lat", "double"),
            ("center_lon", "double"),
            ("polygon_wkt", "text"),
        ],
        vec![
            vec![
                json!("ZONE_001"),
                json!("Central Business District"),
                json!("commercial"),
                json!(12.9716),
                json!(77.5946),
                json!("POLYGON((77.61 12.97, 77.59 12.99, 77.57 12.97, 77.59 12.95, 77.61 12.97))"),
            ],
            vec![
                json!("ZONE_007"),
                json!("HSR Layout"),
                json!("residential"),
                json!(12.9116),
                json!(77.6473),
                json!("POLYGON((77.66 12.91, 77.65 12.92, 77.63 12.91, 77.65 12.90, 77.66 12.91))"),
            ],
        ],
    )
}

/// `n` orders of STORE_001 at increasing distance.
pub fn distance_rows(n: usize) -> Reply {
    let rows = (1..=n)
        .map(|i| {
            vec![
                json!(format!("ORD_{i:06}")),
                json!("STORE_001"),
                json!(12.93),
                json!(77.62),
                json!(12.9279),
                json!(77.6271),
                json!(100.0 + i as f64),
                json!(20 + i as i64 % 30),
                json!(0.5 * i as f64),
            ]
        })
        .collect();
    result_set(
        &[
            ("order_id", "text"),
            ("store_id", "text"),
            ("customer_lat", "double"),
            ("customer_lon", "double"),
            ("store_lat", "double"),
            ("store_lon", "double"),
            ("order_value", "double"),
            ("delivery_time_minutes", "int"),
            ("distance_km", "double"),
        ],
        rows,
    )
}

pub fn containment_rows() -> Reply {
    result_set(
        &[
            ("order_id", "text"),
            ("customer_lat", "double"),
            ("customer_lon", "double"),
            ("order_value", "double"),
            ("store_id", "text"),
            ("zone_id", "text"),
            ("zone_name", "text"),
        ],
        vec![
            vec![json!("ORD_000010"), json!(12.97), json!(77.59), json!(900.5), json!("STORE_008"), json!("ZONE_001"), json!("Central Business District")],
            vec![json!("ORD_000011"), json!(12.911), json!(77.647), json!(300.0), json!("STORE_007"), json!("ZONE_007"), json!("HSR Layout")],
            vec![json!("ORD_000012"), json!(12.972), json!(77.596), json!(120.0), json!("STORE_008"), json!("ZONE_001"), json!("Central Business District")],
        ],
    )
}

/// Coverage rows; `is_covered` arrives in the mixed encodings Firebolt uses.
pub fn coverage_rows() -> Reply {
    result_set(
        &[
            ("order_id", "text"),
            ("customer_lat", "double"),
            ("customer_lon", "double"),
            ("order_value", "double"),
            ("store_id", "text"),
            ("distance_km", "double"),
            ("is_covered", "boolean"),
        ],
        vec![
            vec![json!("ORD_000001"), json!(13.0), json!(77.6), json!(200.0), json!("STORE_002"), json!(0.5), json!(true)],
            vec![json!("ORD_000002"), json!(13.01), json!(77.61), json!(150.0), json!("STORE_002"), json!(1.6), json!(1)],
            vec![json!("ORD_000003"), json!(13.09), json!(77.6), json!(400.0), json!("STORE_008"), json!(10.0), json!("f")],
        ],
    )
}

/// A fake with both tables populated and every analysis answering.
pub fn seeded_executor() -> FakeExecutor {
    seeded(FakeExecutor::new())
}

/// Add the populated-tables replies behind whatever `db` already answers.
pub fn seeded(db: FakeExecutor) -> FakeExecutor {
    db.on(ORDERS_COUNT, count(50_000))
        .on(ZONES_COUNT, count(10))
        .on(STORES_QUERY, stores())
        .on(ZONES_QUERY, zones())
        .on(DISTANCE_QUERY, distance_rows(12))
        .on(CONTAINMENT_QUERY, containment_rows())
        .on(COVERAGE_QUERY, coverage_rows())
}

// ---------------------------------------------------------------------------
// App helpers
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8501".to_string()],
        request_timeout_secs: 30,
        static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../static")),
        zone_schema: ZoneSchema::Polygon,
    }
}

/// Build the full application router with all middleware layers over the
/// given fake.
///
/// Uses the same `build_app_router` as `main.rs`, so integration tests
/// exercise the production middleware stack.
pub fn build_test_app(db: Arc<FakeExecutor>) -> Router {
    build_test_app_with(db, test_config())
}

pub fn build_test_app_with(db: Arc<FakeExecutor>, config: ServerConfig) -> Router {
    let state = AppState {
        db,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
