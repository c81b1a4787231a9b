//! Database access for the geospatial demo.
//!
//! The dashboard and the loader only ever talk to the database through the
//! [`QueryExecutor`] trait; [`FireboltClient`] is the production
//! implementation over Firebolt's REST API.

pub mod config;
pub mod error;
pub mod executor;
pub mod firebolt;
pub mod loader;
pub mod result;

pub use config::{Credentials, FireboltConfig};
pub use error::DbError;
pub use executor::{health_check, query_as, QueryExecutor};
pub use firebolt::FireboltClient;
pub use result::{ColumnMeta, ResultSet};
