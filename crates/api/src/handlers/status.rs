//! Handler for the sample data status banner.

use axum::extract::State;
use axum::Json;
use geodemo_core::schema::all_ddl;
use geodemo_core::zones::ZoneSchema;
use geodemo_db::loader::existing_counts;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Row counts of both tables and, when either is empty, how to fill them.
#[derive(Debug, Serialize)]
pub struct DataStatus {
    pub orders: i64,
    pub zones: i64,
    pub ready: bool,
    pub zone_schema: ZoneSchema,
    pub setup: Option<SetupGuide>,
}

#[derive(Debug, Serialize)]
pub struct SetupGuide {
    pub message: &'static str,
    pub steps: [&'static str; 3],
    pub includes: [&'static str; 3],
    pub ddl: [&'static str; 2],
}

const SETUP_STEPS: [&str; 3] = [
    "Put your Firebolt credentials in .env (FIREBOLT_CLIENT_ID, FIREBOLT_CLIENT_SECRET, FIREBOLT_ACCOUNT, FIREBOLT_DATABASE, FIREBOLT_ENGINE)",
    "Generate and load the sample data: geodemo-datagen load",
    "Or run the DDL below yourself (geodemo-datagen schema prints it) and insert your own geospatial data",
];

const SAMPLE_CONTENTS: [&str; 3] = [
    "50,000 customer orders with realistic Bengaluru coordinates",
    "10 geographic zones covering different areas of Bengaluru",
    "8 store locations in major Bengaluru districts",
];

/// GET /api/v1/status
pub async fn data_status(State(state): State<AppState>) -> AppResult<Json<DataResponse<DataStatus>>> {
    let counts = existing_counts(state.db.as_ref()).await?;
    let zone_schema = state.config.zone_schema;
    let ready = counts.is_ready();

    if !ready {
        tracing::info!(orders = counts.orders, zones = counts.zones, "Sample data missing");
    }

    let setup = (!ready).then(|| SetupGuide {
        message: "No sample data found in your database",
        steps: SETUP_STEPS,
        includes: SAMPLE_CONTENTS,
        ddl: all_ddl(zone_schema),
    });

    Ok(Json(DataResponse {
        data: DataStatus {
            orders: counts.orders,
            zones: counts.zones,
            ready,
            zone_schema,
            setup,
        },
    }))
}
