//! Fleet synthesis: the initial couriers and orders of a run.
//!
//! # Initial state
//!
//! With `n` drivers and `m` deliveries, the first `k = min(n, m)` drivers are
//! bound to the first `k` deliveries (driver `i` ↔ delivery `i`).  Bound
//! drivers alternate between `EnRoute` (even index) and `Delivering` (odd
//! index) and their deliveries start `InTransit`.  Remaining drivers start
//! `Idle`; remaining deliveries start `Pending`.
//!
//! # Usage
//!
//! ```rust
//! use fleet_agent::FleetBuilder;
//! use fleet_core::{FleetConfig, SimRng};
//!
//! let config = FleetConfig::default();
//! let mut rng = SimRng::new(config.seed);
//! let (store, rngs) = FleetBuilder::new(&config).build(&mut rng);
//!
//! assert_eq!(store.drivers.len(), 8);
//! assert_eq!(rngs.len(), 8);
//! ```

use fleet_core::{
    DeliveryId, DeliveryStatus, DriverId, DriverStatus, FleetConfig, GeoPoint, SimRng,
    VehicleType,
};
use tracing::info;

use crate::{Delivery, Driver, DriverRngs, FleetStore};

const DRIVER_NAMES: [&str; 8] = [
    "Alex Chen",
    "Maria Garcia",
    "James Wilson",
    "Sarah Johnson",
    "Michael Brown",
    "Emily Davis",
    "David Martinez",
    "Lisa Anderson",
];

const STREETS: [&str; 10] = [
    "Market St",
    "Mission St",
    "Valencia St",
    "Folsom St",
    "Howard St",
    "Geary Blvd",
    "Van Ness Ave",
    "Divisadero St",
    "Irving St",
    "Columbus Ave",
];

/// Orders are promised this long after creation until a route says otherwise.
const DEFAULT_PROMISE_SECS: i64 = 30 * 60;

/// Synthetic positions stay inside this fraction of the movement bounds so
/// nobody starts pressed against the edge.
const PLACEMENT_FRACTION: f64 = 0.8;

/// Fluent builder for the initial [`FleetStore`] + [`DriverRngs`].
pub struct FleetBuilder {
    driver_count: usize,
    delivery_count: usize,
    seed: u64,
    center: GeoPoint,
    half_deg: f64,
    start_unix_secs: i64,
}

impl FleetBuilder {
    /// Take counts, area and seed from `config`.
    pub fn new(config: &FleetConfig) -> Self {
        Self {
            driver_count: config.driver_count,
            delivery_count: config.delivery_count,
            seed: config.seed,
            center: config.center,
            half_deg: config.bounds_half_deg,
            start_unix_secs: config.start_unix_secs,
        }
    }

    /// Override the number of drivers.
    pub fn drivers(mut self, count: usize) -> Self {
        self.driver_count = count;
        self
    }

    /// Override the number of deliveries.
    pub fn deliveries(mut self, count: usize) -> Self {
        self.delivery_count = count;
        self
    }

    /// Synthesise the fleet, drawing positions and headings from `rng`.
    pub fn build(self, rng: &mut SimRng) -> (FleetStore, DriverRngs) {
        let spread = placement_spread(self.half_deg);

        let drivers: Vec<Driver> = (0..self.driver_count)
            .map(|i| {
                let name = match i / DRIVER_NAMES.len() {
                    0 => DRIVER_NAMES[i].to_string(),
                    round => format!("{} {}", DRIVER_NAMES[i % DRIVER_NAMES.len()], round + 1),
                };
                let location = self
                    .center
                    .offset(rng.symmetric(spread), rng.symmetric(spread));
                let heading = rng.gen_range(0.0..360.0);
                let vehicle = VehicleType::ALL[i % VehicleType::ALL.len()];
                Driver::new(DriverId(i as u32), name, location, heading, vehicle)
            })
            .collect();

        let deliveries: Vec<Delivery> = (0..self.delivery_count)
            .map(|i| {
                let created = self.start_unix_secs - rng.gen_range(0..=20 * 60);
                random_delivery(DeliveryId(i as u32), rng, self.center, spread, created)
            })
            .collect();

        let mut store = FleetStore::new(drivers, deliveries);

        let bound = self.driver_count.min(self.delivery_count);
        for i in 0..bound {
            let (driver, delivery) = (DriverId(i as u32), DeliveryId(i as u32));
            store.bind(driver, delivery);
            store.drivers[i].status = if i % 2 == 0 {
                DriverStatus::EnRoute
            } else {
                DriverStatus::Delivering
            };
            store.deliveries[i].status = DeliveryStatus::InTransit;
        }

        info!(
            drivers = self.driver_count,
            deliveries = self.delivery_count,
            bound,
            "fleet synthesised"
        );

        let rngs = DriverRngs::new(self.driver_count, self.seed);
        (store, rngs)
    }
}

/// A fresh pending order with random pickup and dropoff within `spread`
/// degrees of `center`, created at `created_unix_secs`.
pub fn random_delivery(
    id: DeliveryId,
    rng: &mut SimRng,
    center: GeoPoint,
    spread: f64,
    created_unix_secs: i64,
) -> Delivery {
    let pickup = center.offset(rng.symmetric(spread), rng.symmetric(spread));
    let dropoff = center.offset(rng.symmetric(spread), rng.symmetric(spread));
    Delivery {
        id,
        order_number: Delivery::order_number_for(id),
        pickup,
        pickup_address: random_address(rng),
        dropoff,
        dropoff_address: random_address(rng),
        status: DeliveryStatus::Pending,
        assigned_driver: None,
        estimated_arrival_unix_secs: created_unix_secs + DEFAULT_PROMISE_SECS,
        created_unix_secs,
    }
}

fn random_address(rng: &mut SimRng) -> String {
    let number = rng.gen_range(1..=2_999u32);
    let street = STREETS[rng.gen_range(0..STREETS.len())];
    format!("{number} {street}")
}

/// Placement spread for synthetic coordinates inside bounds of `half_deg`.
#[inline]
pub fn placement_spread(half_deg: f64) -> f64 {
    half_deg * PLACEMENT_FRACTION
}
