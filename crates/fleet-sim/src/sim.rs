//! The `FleetSim` struct and its tick.

use fleet_agent::{DriverRngs, FleetStore, placement_spread, random_delivery};
use fleet_core::{DeliveryId, DriverId, DriverStatus, FleetConfig, SimClock, SimRng, Tick};
use fleet_dispatch::{Dispatcher, DriverSelector, Transition};
use fleet_mobility::MovementEngine;
use fleet_spatial::{PathBuilder, Route, RouteStore, optimize_route};
use tracing::{debug, trace};

use crate::{DashboardStats, FleetSnapshot, SimObserver};

/// Independent random streams for the phases that draw from a [`SimRng`].
///
/// Kept apart so that, for example, spawning an extra order never shifts
/// which driver the dispatcher picks next.
#[derive(Debug, Clone)]
pub(crate) struct PhaseRngs {
    pub(crate) dispatch: SimRng,
    pub(crate) geometry: SimRng,
    pub(crate) orders:   SimRng,
}

// ── FleetSim ──────────────────────────────────────────────────────────────────

/// The single-threaded simulation state holder.
///
/// Each call to [`step`][Self::step] runs one tick:
///
/// 1. **Clock** advances; the new tick is the 1-based tick ordinal.
/// 2. **Movement**: every `EnRoute`/`Returning` driver takes one step.
/// 3. **Dispatch** (every `dispatch_interval_ticks`): one driver, chosen by
///    the selector, advances one status.
/// 4. **Routes** of the advanced driver are regenerated or dropped.
/// 5. **Orders**: a new pending delivery every `order_interval_ticks`.
/// 6. **Stats** are re-aggregated and observers notified.
///
/// Create via [`SimBuilder`][crate::SimBuilder].  For real-time operation
/// wrap it in a [`FleetHandle`][crate::FleetHandle].
pub struct FleetSim<S: DriverSelector, P: PathBuilder> {
    pub(crate) config:            FleetConfig,
    pub(crate) clock:             SimClock,
    pub(crate) fleet:             FleetStore,
    /// Per-driver RNGs, kept apart from `fleet` for the split-borrow pattern.
    pub(crate) driver_rngs:       DriverRngs,
    pub(crate) routes:            RouteStore,
    pub(crate) rngs:              PhaseRngs,
    pub(crate) movement:          MovementEngine,
    pub(crate) dispatcher:        Dispatcher<S>,
    pub(crate) path_builder:      P,
    pub(crate) stats:             DashboardStats,
    pub(crate) selected_driver:   Option<DriverId>,
    pub(crate) selected_delivery: Option<DeliveryId>,
}

impl<S: DriverSelector, P: PathBuilder> FleetSim<S, P> {
    // ── Ticking ───────────────────────────────────────────────────────────

    /// Run one tick and return its ordinal.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> Tick {
        let now = self.clock.advance();
        observer.on_tick_start(now);

        let movement = self.movement.advance_all(&mut self.fleet, &mut self.driver_rngs);

        let outcome = self.dispatcher.dispatch(now, &mut self.fleet, &mut self.rngs.dispatch);
        if let Some(transition) = outcome.transition() {
            self.update_route(&transition);
            observer.on_transition(now, &transition);
        }

        if now.is_every(self.config.order_interval_ticks) {
            self.spawn_order();
        }

        self.stats = DashboardStats::aggregate(&self.fleet, &self.config);
        trace!(
            tick = %now,
            moved = movement.moved,
            bounced = movement.bounced,
            active = self.stats.active_drivers,
            "tick complete"
        );

        observer.on_tick_end(now, &self.stats);
        if now.is_every(self.config.output_interval_ticks) {
            observer.on_snapshot(now, &self.clock, &self.fleet, &self.routes);
        }
        now
    }

    /// Run exactly `n` ticks, then call `on_sim_end`.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Select a driver for the dashboard's detail view.
    ///
    /// Also selects the driver's current delivery, if any.  `None` or an
    /// unknown id clears both selections.  Never affects the simulation.
    pub fn select_driver(&mut self, driver: Option<DriverId>) {
        match driver.and_then(|id| self.fleet.driver(id)) {
            Some(d) => {
                self.selected_driver = Some(d.id);
                self.selected_delivery = d.current_delivery;
            }
            None => {
                self.selected_driver = None;
                self.selected_delivery = None;
            }
        }
    }

    /// Reorder `driver`'s route waypoints and rebuild its geometry.
    ///
    /// Returns `false` (and changes nothing) if the driver has no route or
    /// the route has no waypoints.
    pub fn optimize_route(&mut self, driver: DriverId) -> bool {
        match self.routes.get_mut(driver) {
            Some(route) => optimize_route(route, &self.path_builder, &mut self.rngs.geometry),
            None => false,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Deep-copy the current state.
    pub fn snapshot(&self) -> FleetSnapshot {
        FleetSnapshot {
            tick:              self.clock.current_tick,
            unix_secs:         self.clock.current_unix_secs(),
            drivers:           self.fleet.drivers.clone(),
            deliveries:        self.fleet.deliveries.clone(),
            routes:            self.routes.iter().cloned().collect(),
            stats:             self.stats,
            selected_driver:   self.selected_driver,
            selected_delivery: self.selected_delivery,
        }
    }

    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn fleet(&self) -> &FleetStore {
        &self.fleet
    }

    pub fn routes(&self) -> &RouteStore {
        &self.routes
    }

    pub fn route(&self, driver: DriverId) -> Option<&Route> {
        self.routes.get(driver)
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn selected_driver(&self) -> Option<DriverId> {
        self.selected_driver
    }

    pub fn selected_delivery(&self) -> Option<DeliveryId> {
        self.selected_delivery
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    /// Keep the route store in line with the driver's new status: a fresh
    /// route while carrying a delivery, none otherwise.
    fn update_route(&mut self, t: &Transition) {
        if !t.affects_route() {
            return;
        }

        let planned = if t.to.carries_delivery() {
            let driver = &self.fleet.drivers[t.driver.index()];
            driver
                .current_delivery
                .and_then(|id| self.fleet.delivery(id))
                .map(|delivery| {
                    let route = self.routes.plan(driver, delivery, &self.path_builder, &mut self.rngs.geometry);
                    (delivery.id, route.duration_secs)
                })
        } else {
            None
        };

        match planned {
            Some((delivery, duration_secs)) => {
                if t.from == DriverStatus::Idle {
                    let eta = self.clock.current_unix_secs() + duration_secs.round() as i64;
                    if let Some(d) = self.fleet.delivery_mut(delivery) {
                        d.estimated_arrival_unix_secs = eta;
                    }
                }
            }
            None => {
                if self.routes.remove(t.driver).is_some() {
                    debug!(driver = %t.driver, "route dropped");
                }
            }
        }
    }

    /// Append one fresh pending order.
    fn spawn_order(&mut self) {
        let id = self.fleet.next_delivery_id();
        let delivery = random_delivery(
            id,
            &mut self.rngs.orders,
            self.config.center,
            placement_spread(self.config.bounds_half_deg),
            self.clock.current_unix_secs(),
        );
        debug!(delivery = %delivery.order_number, pickup = %delivery.pickup, "order received");
        self.fleet.push_delivery(delivery);
    }
}
