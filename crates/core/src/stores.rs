//! Fixed store list the generator assigns orders to.
//!
//! `customer_orders.store_id` is an implicit reference into this list; the
//! database has no stores table.

use serde::Serialize;

use crate::error::CoreError;
use crate::geo::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Store {
    pub id: &'static str,
    pub name: &'static str,
    pub location: GeoPoint,
}

pub const STORES: &[Store] = &[
    Store {
        id: "STORE_001",
        name: "Koramangala",
        location: GeoPoint::new(12.9279, 77.6271),
    },
    Store {
        id: "STORE_002",
        name: "Indiranagar",
        location: GeoPoint::new(12.9784, 77.6408),
    },
    Store {
        id: "STORE_003",
        name: "Whitefield",
        location: GeoPoint::new(12.9698, 77.7500),
    },
    Store {
        id: "STORE_004",
        name: "Electronic City",
        location: GeoPoint::new(12.8456, 77.6603),
    },
    Store {
        id: "STORE_005",
        name: "JP Nagar",
        location: GeoPoint::new(12.9083, 77.5833),
    },
    Store {
        id: "STORE_006",
        name: "Marathahalli",
        location: GeoPoint::new(12.9591, 77.6974),
    },
    Store {
        id: "STORE_007",
        name: "HSR Layout",
        location: GeoPoint::new(12.9116, 77.6473),
    },
    Store {
        id: "STORE_008",
        name: "Rajajinagar",
        location: GeoPoint::new(12.9915, 77.5632),
    },
];

/// Look up a store by id.
pub fn find_store(id: &str) -> Option<&'static Store> {
    STORES.iter().find(|s| s.id == id)
}

/// Resolve a store id, failing with `NotFound` for unknown ids.
pub fn require_store(id: &str) -> Result<&'static Store, CoreError> {
    find_store(id).ok_or_else(|| CoreError::NotFound {
        entity: "Store",
        id: id.to_string(),
    })
}
