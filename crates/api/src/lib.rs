//! Geospatial demo dashboard server.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! figure builders) so integration tests and the binary entrypoint can both
//! access them.

pub mod charts;
pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
