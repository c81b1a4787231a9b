//! Domain layer for the geospatial demo.
//!
//! Holds the fixed reference data (stores, zones), the record shapes of the
//! two persisted tables, their DDL, and the SQL templates the dashboard and
//! loader send to the database. Nothing in here talks to the network.

pub mod analysis;
pub mod error;
pub mod geo;
pub mod orders;
pub mod queries;
pub mod reference;
pub mod schema;
pub mod sql;
pub mod stats;
pub mod stores;
pub mod types;
pub mod zones;
