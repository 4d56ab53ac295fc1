//! Simulation observer trait for progress reporting and data collection.

use std::sync::Arc;

use fleet_agent::FleetStore;
use fleet_core::{SimClock, Tick};
use fleet_dispatch::Transition;
use fleet_spatial::RouteStore;
use parking_lot::Mutex;

use crate::DashboardStats;

/// Callbacks invoked by [`FleetSim::step`][crate::FleetSim::step] at key
/// points in the tick.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — completion counter
///
/// ```rust,ignore
/// struct Completions(usize);
///
/// impl SimObserver for Completions {
///     fn on_transition(&mut self, _tick: Tick, t: &Transition) {
///         if t.to == DriverStatus::Returning {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, right after the clock advances.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called when the dispatch phase advanced a driver.  At most once per
    /// tick.
    fn on_transition(&mut self, _tick: Tick, _transition: &Transition) {}

    /// Called at the end of each tick with the freshly aggregated stats.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &DashboardStats) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with read-only access to the full fleet and route state.
    fn on_snapshot(
        &mut self,
        _tick:   Tick,
        _clock:  &SimClock,
        _fleet:  &FleetStore,
        _routes: &RouteStore,
    ) {}

    /// Called once when a run finishes (headless) or the ticker stops.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Lets the caller keep a handle on an observer that has been moved onto the
/// ticker thread, e.g. to collect a writer error after `stop`.
impl<O: SimObserver> SimObserver for Arc<Mutex<O>> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.lock().on_tick_start(tick);
    }

    fn on_transition(&mut self, tick: Tick, transition: &Transition) {
        self.lock().on_transition(tick, transition);
    }

    fn on_tick_end(&mut self, tick: Tick, stats: &DashboardStats) {
        self.lock().on_tick_end(tick, stats);
    }

    fn on_snapshot(&mut self, tick: Tick, clock: &SimClock, fleet: &FleetStore, routes: &RouteStore) {
        self.lock().on_snapshot(tick, clock, fleet, routes);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.lock().on_sim_end(final_tick);
    }
}
