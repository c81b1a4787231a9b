use std::path::PathBuf;

use geodemo_core::zones::ZoneSchema;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for running the demo locally.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8501`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`).
    pub request_timeout_secs: u64,
    /// Directory holding the single-page dashboard (default: `static`).
    pub static_dir: PathBuf,
    /// Layout of the `geo_zones` table the queries are written against.
    pub zone_schema: ZoneSchema,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8501`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:8501`    |
    /// | `REQUEST_TIMEOUT_SECS` | `60`                       |
    /// | `STATIC_DIR`           | `static`                   |
    /// | `ZONE_SCHEMA`          | `polygon`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8501".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8501".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let static_dir = PathBuf::from(
            std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into()),
        );

        let zone_schema: ZoneSchema = std::env::var("ZONE_SCHEMA")
            .unwrap_or_else(|_| "polygon".into())
            .parse()
            .expect("ZONE_SCHEMA must be 'polygon' or 'radius'");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            static_dir,
            zone_schema,
        }
    }
}
