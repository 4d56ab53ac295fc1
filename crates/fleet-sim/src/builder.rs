//! Fluent builder for constructing a [`FleetSim`].

use fleet_agent::{DriverRngs, FleetBuilder, FleetStore};
use fleet_core::{FleetConfig, SimRng};
use fleet_dispatch::{Dispatcher, DriverSelector, UniformSelector};
use fleet_mobility::MovementEngine;
use fleet_spatial::{InterpolatedPath, PathBuilder, RouteStore};
use tracing::info;

use crate::sim::PhaseRngs;
use crate::{DashboardStats, FleetSim, SimError, SimResult};

/// Fluent builder for [`FleetSim<S, P>`].
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                         |
/// |----------------------|-------------------------------------------------|
/// | `.selector(s)`       | [`UniformSelector`]                             |
/// | `.path_builder(p)`   | [`InterpolatedPath`] with `config.route_jitter_deg` |
/// | `.fleet(store, rngs)`| Synthesised by [`FleetBuilder`] from the config |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(FleetConfig::default())
///     .path_builder(InterpolatedPath::exact())
///     .build()?;
/// sim.run_ticks(100, &mut NoopObserver);
/// ```
pub struct SimBuilder<S: DriverSelector, P: PathBuilder> {
    config:       FleetConfig,
    fleet:        Option<(FleetStore, DriverRngs)>,
    selector:     S,
    path_builder: P,
}

impl SimBuilder<UniformSelector, InterpolatedPath> {
    /// Create a builder with the default selection policy and geometry.
    pub fn new(config: FleetConfig) -> Self {
        let path_builder = InterpolatedPath::with_jitter(config.route_jitter_deg);
        Self {
            config,
            fleet: None,
            selector: UniformSelector,
            path_builder,
        }
    }
}

impl<S: DriverSelector, P: PathBuilder> SimBuilder<S, P> {
    /// Replace the dispatch selection policy.
    pub fn selector<S2: DriverSelector>(self, selector: S2) -> SimBuilder<S2, P> {
        SimBuilder {
            config:       self.config,
            fleet:        self.fleet,
            selector,
            path_builder: self.path_builder,
        }
    }

    /// Replace the route geometry strategy.
    pub fn path_builder<P2: PathBuilder>(self, path_builder: P2) -> SimBuilder<S, P2> {
        SimBuilder {
            config:   self.config,
            fleet:    self.fleet,
            selector: self.selector,
            path_builder,
        }
    }

    /// Supply a pre-built fleet instead of synthesising one.
    ///
    /// `rngs` must have one entry per driver.  Routes are still generated for
    /// every driver whose status carries a delivery.
    pub fn fleet(mut self, store: FleetStore, rngs: DriverRngs) -> Self {
        self.fleet = Some((store, rngs));
        self
    }

    /// Validate inputs, synthesise the fleet if needed, plan initial routes,
    /// and return a ready-to-run [`FleetSim`].
    pub fn build(self) -> SimResult<FleetSim<S, P>> {
        self.config.validate()?;

        // ── Independent random streams from one root seed ─────────────────
        let mut root = SimRng::new(self.config.seed);
        let mut setup = root.child(1);
        let mut rngs = PhaseRngs {
            dispatch: root.child(2),
            geometry: root.child(3),
            orders:   root.child(4),
        };

        // ── Fleet ─────────────────────────────────────────────────────────
        let (fleet, driver_rngs) = match self.fleet {
            Some((store, driver_rngs)) => {
                if driver_rngs.len() != store.drivers.len() {
                    return Err(SimError::DriverCountMismatch {
                        expected: store.drivers.len(),
                        got:      driver_rngs.len(),
                    });
                }
                (store, driver_rngs)
            }
            None => FleetBuilder::new(&self.config).build(&mut setup),
        };

        // ── Initial routes for drivers already carrying a delivery ────────
        let mut routes = RouteStore::new();
        for driver in fleet.drivers.iter().filter(|d| d.status.carries_delivery()) {
            if let Some(delivery) = driver.current_delivery.and_then(|id| fleet.delivery(id)) {
                routes.plan(driver, delivery, &self.path_builder, &mut rngs.geometry);
            }
        }

        info!(
            seed = self.config.seed,
            drivers = fleet.drivers.len(),
            deliveries = fleet.deliveries.len(),
            routes = routes.len(),
            "fleet simulation ready"
        );

        Ok(FleetSim {
            clock:             self.config.make_clock(),
            movement:          MovementEngine::new(&self.config),
            dispatcher:        Dispatcher::new(self.selector, self.config.dispatch_interval_ticks),
            stats:             DashboardStats::aggregate(&fleet, &self.config),
            config:            self.config,
            fleet,
            driver_rngs,
            routes,
            rngs,
            path_builder:      self.path_builder,
            selected_driver:   None,
            selected_delivery: None,
        })
    }
}
