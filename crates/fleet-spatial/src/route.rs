//! Routes, waypoints, and the per-driver route store.

use std::collections::BTreeMap;

use fleet_agent::{Delivery, Driver};
use fleet_core::{DriverId, GeoPoint, RouteId, SimRng, VehicleType, WaypointId};
use tracing::debug;

use crate::{PathBuilder, PathGeometry, Polyline};

// ── Waypoint ──────────────────────────────────────────────────────────────────

/// What a waypoint stands for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WaypointKind {
    /// Route origin: the depot, or the courier's position when the route
    /// was generated.
    Warehouse,
    Pickup,
    Dropoff,
}

/// A labelled point on a route with an explicit zero-based position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub id: WaypointId,
    pub location: GeoPoint,
    pub label: String,
    pub kind: WaypointKind,
    pub order: u32,
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// The travel plan of one driver.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub id: RouteId,
    pub driver: DriverId,
    pub waypoints: Vec<Waypoint>,
    pub polyline: Polyline,
    pub distance_m: f64,
    pub duration_secs: f64,
    pub is_optimized: bool,
}

impl Route {
    /// Estimated travel time for `distance_m` at the vehicle's fixed speed.
    pub fn duration_for(distance_m: f64, vehicle: VehicleType) -> f64 {
        distance_m / vehicle.speed_mps()
    }

    /// `true` if waypoint orders are exactly `0, 1, 2, …` in list order.
    pub fn is_well_ordered(&self) -> bool {
        self.waypoints
            .iter()
            .enumerate()
            .all(|(i, wp)| wp.order as usize == i)
    }

    /// Rewrite waypoint orders to match their list positions.
    pub fn renumber(&mut self) {
        for (i, wp) in self.waypoints.iter_mut().enumerate() {
            wp.order = i as u32;
        }
    }

    /// Replace the path and distance, leaving waypoints and duration alone.
    pub fn set_geometry(&mut self, geometry: PathGeometry) {
        self.polyline = geometry.polyline;
        self.distance_m = geometry.distance_m;
    }
}

// ── RouteStore ────────────────────────────────────────────────────────────────

/// At most one route per driver, plus the id counters for new routes and
/// waypoints.
///
/// Keyed by `BTreeMap` so iteration (and therefore snapshots and output) is
/// in ascending driver order.
#[derive(Debug, Clone)]
pub struct RouteStore {
    routes: BTreeMap<DriverId, Route>,
    next_route: RouteId,
    next_waypoint: WaypointId,
}

impl Default for RouteStore {
    fn default() -> Self {
        Self {
            routes: BTreeMap::new(),
            next_route: RouteId(0),
            next_waypoint: WaypointId(0),
        }
    }
}

impl RouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, driver: DriverId) -> Option<&Route> {
        self.routes.get(&driver)
    }

    #[inline]
    pub fn get_mut(&mut self, driver: DriverId) -> Option<&mut Route> {
        self.routes.get_mut(&driver)
    }

    /// Drop the driver's route, if any.
    pub fn remove(&mut self, driver: DriverId) -> Option<Route> {
        self.routes.remove(&driver)
    }

    /// Install a route built elsewhere, replacing the driver's current one.
    pub fn insert(&mut self, route: Route) -> Option<Route> {
        self.routes.insert(route.driver, route)
    }

    /// Routes in ascending driver order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Generate a fresh route for `driver` carrying `delivery`, replacing any
    /// existing one.
    ///
    /// Waypoints are the driver's current position (origin), the pickup and
    /// the dropoff.  Duration is the path length at the vehicle's speed.
    pub fn plan<P: PathBuilder>(
        &mut self,
        driver:   &Driver,
        delivery: &Delivery,
        builder:  &P,
        rng:      &mut SimRng,
    ) -> &Route {
        let waypoints = vec![
            self.waypoint(driver.location, format!("{} (current)", driver.name), WaypointKind::Warehouse, 0),
            self.waypoint(delivery.pickup, delivery.pickup_address.clone(), WaypointKind::Pickup, 1),
            self.waypoint(delivery.dropoff, delivery.dropoff_address.clone(), WaypointKind::Dropoff, 2),
        ];

        let geometry = builder.build(driver.location, delivery.pickup, delivery.dropoff, rng);
        let id = self.allocate_route_id();

        let route = Route {
            id,
            driver: driver.id,
            waypoints,
            duration_secs: Route::duration_for(geometry.distance_m, driver.vehicle),
            distance_m: geometry.distance_m,
            polyline: geometry.polyline,
            is_optimized: false,
        };
        debug!(
            driver = %driver.id,
            route = %route.id,
            delivery = %delivery.order_number,
            distance_m = route.distance_m,
            "route planned"
        );

        self.routes.insert(driver.id, route);
        &self.routes[&driver.id]
    }

    /// A waypoint with a fresh id.
    pub fn waypoint(
        &mut self,
        location: GeoPoint,
        label:    impl Into<String>,
        kind:     WaypointKind,
        order:    u32,
    ) -> Waypoint {
        let id = self.next_waypoint;
        self.next_waypoint = id.next();
        Waypoint { id, location, label: label.into(), kind, order }
    }

    /// A route id that has never been handed out.
    pub fn allocate_route_id(&mut self) -> RouteId {
        let id = self.next_route;
        self.next_route = id.next();
        id
    }
}
