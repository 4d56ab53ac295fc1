//! Fleet storage: `FleetStore` (entities) and `DriverRngs` (per-driver RNG).
//!
//! # Why two structs?
//!
//! The movement advancer needs `&mut Driver` and `&mut DriverRng` for the same
//! driver at the same time, optionally across Rayon workers.  Keeping the RNGs
//! in a separate `DriverRngs` lets callers zip `store.drivers.iter_mut()` with
//! `rngs.inner.iter_mut()` without fighting the borrow checker.

use fleet_core::{DeliveryId, DeliveryStatus, DriverId, DriverRng};

use crate::{Delivery, Driver};

// ── DriverRngs ────────────────────────────────────────────────────────────────

/// Per-driver deterministic RNG state, index-aligned with `FleetStore::drivers`.
#[derive(Clone, Debug)]
pub struct DriverRngs {
    pub inner: Vec<DriverRng>,
}

impl DriverRngs {
    /// Allocate and seed `count` per-driver RNGs from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| DriverRng::new(global_seed, DriverId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one driver's RNG.
    #[inline]
    pub fn get_mut(&mut self, driver: DriverId) -> &mut DriverRng {
        &mut self.inner[driver.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── FleetStore ────────────────────────────────────────────────────────────────

/// All drivers and deliveries of one run.
///
/// Both `Vec`s are indexed by id.  Lookups by an out-of-range id return
/// `None` instead of panicking, since ids may arrive from outside the tick
/// (e.g. a UI selection).
#[derive(Clone, Debug, Default)]
pub struct FleetStore {
    pub drivers: Vec<Driver>,
    pub deliveries: Vec<Delivery>,
}

impl FleetStore {
    pub fn new(drivers: Vec<Driver>, deliveries: Vec<Delivery>) -> Self {
        Self { drivers, deliveries }
    }

    #[inline]
    pub fn driver(&self, id: DriverId) -> Option<&Driver> {
        self.drivers.get(id.index())
    }

    #[inline]
    pub fn driver_mut(&mut self, id: DriverId) -> Option<&mut Driver> {
        self.drivers.get_mut(id.index())
    }

    #[inline]
    pub fn delivery(&self, id: DeliveryId) -> Option<&Delivery> {
        self.deliveries.get(id.index())
    }

    #[inline]
    pub fn delivery_mut(&mut self, id: DeliveryId) -> Option<&mut Delivery> {
        self.deliveries.get_mut(id.index())
    }

    /// The lowest-id delivery still waiting for a driver.
    pub fn first_pending(&self) -> Option<DeliveryId> {
        self.deliveries
            .iter()
            .find(|d| d.status == DeliveryStatus::Pending)
            .map(|d| d.id)
    }

    /// The id the next appended delivery will receive.
    #[inline]
    pub fn next_delivery_id(&self) -> DeliveryId {
        DeliveryId(self.deliveries.len() as u32)
    }

    /// Append a delivery.  Its id must be [`next_delivery_id`](Self::next_delivery_id).
    pub fn push_delivery(&mut self, delivery: Delivery) -> DeliveryId {
        debug_assert_eq!(delivery.id, self.next_delivery_id());
        let id = delivery.id;
        self.deliveries.push(delivery);
        id
    }

    /// Bind `driver` and `delivery` to each other.
    ///
    /// Both references are written together so the store never exposes a
    /// half-bound pair.  Returns `false` (and changes nothing) if either id
    /// is unknown.
    pub fn bind(&mut self, driver: DriverId, delivery: DeliveryId) -> bool {
        if self.driver(driver).is_none() || self.delivery(delivery).is_none() {
            return false;
        }
        self.drivers[driver.index()].current_delivery = Some(delivery);
        self.deliveries[delivery.index()].assigned_driver = Some(driver);
        true
    }

    /// Number of deliveries with the given status.
    pub fn count_deliveries(&self, status: DeliveryStatus) -> usize {
        self.deliveries.iter().filter(|d| d.status == status).count()
    }
}
