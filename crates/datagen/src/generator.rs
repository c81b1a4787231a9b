//! Order generator.
//!
//! Customers are created once, each attached to a uniformly chosen store and
//! placed at a normally distributed offset from it. Every order then picks a
//! customer from that pool, so repeat customers share a location.

use chrono::Duration;
use geodemo_core::geo::{round_to, GeoPoint, BENGALURU_BOUNDS};
use geodemo_core::orders::{customer_id, order_id, Order};
use geodemo_core::stores::{Store, STORES};
use geodemo_core::types::Timestamp;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Normal};

use crate::error::DatagenError;

pub const DEFAULT_ORDER_COUNT: usize = 50_000;

/// Average number of orders per customer when no pool size is given.
pub const ORDERS_PER_CUSTOMER: usize = 5;

/// Orders are dated within this many days before `now`.
pub const HISTORY_DAYS: i64 = 90;

/// Standard deviation of a customer's offset from their store, per axis.
pub const LOCATION_SPREAD_DEG: f64 = 0.02;

pub const MIN_ORDER_VALUE: f64 = 50.0;

/// Mean of the exponential part of the order value, on top of the minimum.
pub const MEAN_ORDER_VALUE_ABOVE_MIN: f64 = 500.0;

const DELIVERY_BASE_MINUTES: f64 = 20.0;
const DELIVERY_MINUTES_PER_DEGREE: f64 = 1000.0;
const DELIVERY_JITTER_MINUTES: f64 = 5.0;
pub const DELIVERY_MINUTES_RANGE: (i32, i32) = (10, 90);

const PROGRESS_EVERY: usize = 10_000;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub orders: usize,
    pub customers: usize,
    /// Fixed seed for reproducible output; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Reference time the order dates count back from.
    pub now: Timestamp,
}

impl GeneratorConfig {
    pub fn new(orders: usize, now: Timestamp) -> Self {
        Self {
            orders,
            customers: default_customer_pool(orders),
            seed: None,
            now,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self) -> Result<(), DatagenError> {
        if self.orders == 0 {
            return Err(DatagenError::Config("order count must be positive".into()));
        }
        if self.customers == 0 {
            return Err(DatagenError::Config("customer pool must not be empty".into()));
        }
        Ok(())
    }
}

pub fn default_customer_pool(orders: usize) -> usize {
    orders.div_ceil(ORDERS_PER_CUSTOMER).max(1)
}

struct Customer {
    id: String,
    store: &'static Store,
    location: GeoPoint,
    /// Straight-line offset from the store in degrees, before clamping.
    offset_deg: f64,
}

/// Produces [`Order`]s one at a time; iterate it or call
/// [`generate_orders`] for the whole batch.
pub struct OrderGenerator {
    rng: StdRng,
    config: GeneratorConfig,
    customers: Vec<Customer>,
    jitter: Normal<f64>,
    value: Exp<f64>,
    produced: usize,
}

impl OrderGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, DatagenError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let spread = Normal::new(0.0, LOCATION_SPREAD_DEG)
            .map_err(|e| DatagenError::Distribution(e.to_string()))?;
        let jitter = Normal::new(0.0, DELIVERY_JITTER_MINUTES)
            .map_err(|e| DatagenError::Distribution(e.to_string()))?;
        let value = Exp::new(1.0 / MEAN_ORDER_VALUE_ABOVE_MIN)
            .map_err(|e| DatagenError::Distribution(e.to_string()))?;

        let customers = (1..=config.customers)
            .map(|seq| {
                let store = &STORES[rng.random_range(0..STORES.len())];
                let dlat = spread.sample(&mut rng);
                let dlon = spread.sample(&mut rng);
                let clamped = BENGALURU_BOUNDS.clamp(GeoPoint::new(
                    store.location.lat + dlat,
                    store.location.lon + dlon,
                ));
                Customer {
                    id: customer_id(seq),
                    store,
                    location: GeoPoint::new(round_to(clamped.lat, 6), round_to(clamped.lon, 6)),
                    offset_deg: (dlat * dlat + dlon * dlon).sqrt(),
                }
            })
            .collect();

        Ok(Self {
            rng,
            config,
            customers,
            jitter,
            value,
            produced: 0,
        })
    }

    fn next_order(&mut self) -> Order {
        self.produced += 1;
        let customer = &self.customers[self.rng.random_range(0..self.customers.len())];

        let order_value = round_to(self.value.sample(&mut self.rng) + MIN_ORDER_VALUE, 2);

        let age = Duration::seconds(self.rng.random_range(0..HISTORY_DAYS * 86_400));
        let order_date = self.config.now - age;

        let (min_minutes, max_minutes) = DELIVERY_MINUTES_RANGE;
        let minutes = DELIVERY_BASE_MINUTES
            + customer.offset_deg * DELIVERY_MINUTES_PER_DEGREE
            + self.jitter.sample(&mut self.rng);
        let delivery_time_minutes = (minutes as i32).clamp(min_minutes, max_minutes);

        Order {
            order_id: order_id(self.produced),
            customer_id: customer.id.clone(),
            order_date,
            customer_lat: customer.location.lat,
            customer_lon: customer.location.lon,
            order_value,
            store_id: customer.store.id.to_string(),
            store_lat: customer.store.location.lat,
            store_lon: customer.store.location.lon,
            delivery_time_minutes,
        }
    }
}

impl Iterator for OrderGenerator {
    type Item = Order;

    fn next(&mut self) -> Option<Order> {
        if self.produced >= self.config.orders {
            return None;
        }
        Some(self.next_order())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.config.orders - self.produced;
        (left, Some(left))
    }
}

/// Generate every order of `config`, logging progress along the way.
pub fn generate_orders(config: GeneratorConfig) -> Result<Vec<Order>, DatagenError> {
    let total = config.orders;
    let customers = config.customers;
    let mut orders = Vec::with_capacity(total);

    for order in OrderGenerator::new(config)? {
        orders.push(order);
        if orders.len() % PROGRESS_EVERY == 0 {
            tracing::info!(generated = orders.len(), total, "Generating orders");
        }
    }

    tracing::info!(orders = orders.len(), customers, "Generated orders");
    Ok(orders)
}
