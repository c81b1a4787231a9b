//! Synthetic sample data for the geospatial demo.
//!
//! [`generator`] fabricates orders scattered around the fixed stores;
//! [`export`] writes orders and zones as CSV files shaped like the tables.

pub mod error;
pub mod export;
pub mod generator;

pub use error::DatagenError;
pub use generator::{GeneratorConfig, OrderGenerator};
