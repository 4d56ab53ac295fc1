//! Immutable point-in-time copies of the simulation state.

use fleet_agent::{Delivery, Driver};
use fleet_core::{DeliveryId, DriverId, Tick};
use fleet_spatial::Route;

use crate::DashboardStats;

/// Everything a dashboard needs to render one frame.
///
/// A snapshot is a deep clone; it never changes after it is taken and is
/// safe to hand to other threads.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetSnapshot {
    pub tick:              Tick,
    pub unix_secs:         i64,
    pub drivers:           Vec<Driver>,
    pub deliveries:        Vec<Delivery>,
    /// Ordered by driver id.
    pub routes:            Vec<Route>,
    pub stats:             DashboardStats,
    pub selected_driver:   Option<DriverId>,
    pub selected_delivery: Option<DeliveryId>,
}

impl FleetSnapshot {
    pub fn driver(&self, id: DriverId) -> Option<&Driver> {
        self.drivers.get(id.index())
    }

    pub fn delivery(&self, id: DeliveryId) -> Option<&Delivery> {
        self.deliveries.get(id.index())
    }

    pub fn route_for(&self, driver: DriverId) -> Option<&Route> {
        self.routes.iter().find(|r| r.driver == driver)
    }

    /// The route of the selected driver, if it has one.
    pub fn selected_route(&self) -> Option<&Route> {
        self.selected_driver.and_then(|d| self.route_for(d))
    }
}
