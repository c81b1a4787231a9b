use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::types::{timestamp_format, Timestamp};

/// One row of `customer_orders`. Field order matches the table's columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    #[serde(with = "timestamp_format")]
    pub order_date: Timestamp,
    pub customer_lat: f64,
    pub customer_lon: f64,
    pub order_value: f64,
    pub store_id: String,
    pub store_lat: f64,
    pub store_lon: f64,
    pub delivery_time_minutes: i32,
}

impl Order {
    pub fn customer_location(&self) -> GeoPoint {
        GeoPoint::new(self.customer_lat, self.customer_lon)
    }

    pub fn store_location(&self) -> GeoPoint {
        GeoPoint::new(self.store_lat, self.store_lon)
    }
}

/// `ORD_000001` style identifier for the 1-based order sequence number.
pub fn order_id(seq: usize) -> String {
    format!("ORD_{seq:06}")
}

/// `CUST_000001` style identifier for the 1-based customer sequence number.
pub fn customer_id(seq: usize) -> String {
    format!("CUST_{seq:06}")
}
