use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use geodemo_core::error::CoreError;
use geodemo_db::DbError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`DbError`] for the Firebolt
/// round trip. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `geodemo_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A Firebolt error from `geodemo_db`.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

type Classified = (StatusCode, &'static str, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => classify_core_error(core),

            // --- Database errors ---
            AppError::Database(err) => classify_db_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> Classified {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn classify_core_error(err: &CoreError) -> Classified {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::NoSampleData { table } => (
            StatusCode::NOT_FOUND,
            "NO_SAMPLE_DATA",
            format!(
                "No sample data found in {table}. Run `geodemo-datagen load` to generate it"
            ),
        ),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Classify a Firebolt error into an HTTP status, error code, and message.
///
/// - Credential, network and engine lookup failures map to 503.
/// - A statement the engine rejected maps to 502 with the engine's message.
/// - Statements that could not be built map like the underlying core error.
/// - Anything else maps to 500 with a sanitized message.
fn classify_db_error(err: &DbError) -> Classified {
    if err.is_connection_error() {
        tracing::warn!(error = %err, "Firebolt connection failed");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            "CONNECTION_ERROR",
            format!(
                "Database connection failed: {err}. Please check your .env file with Firebolt credentials"
            ),
        );
    }

    match err {
        DbError::Api { status, body } => {
            tracing::error!(status, error = %body, "Query rejected by Firebolt");
            (
                StatusCode::BAD_GATEWAY,
                "QUERY_FAILED",
                format!("Query execution failed: {body}"),
            )
        }
        DbError::Statement(core) => classify_core_error(core),
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
