//! Integration tests for fleet-sim.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use fleet_agent::{FleetBuilder, FleetStore, random_delivery};
use fleet_core::{
    DeliveryId, DeliveryStatus, DriverId, DriverStatus, FleetConfig, SimClock, SimRng, Tick,
};
use fleet_dispatch::{DriverSelector, Transition, UniformSelector};
use fleet_spatial::{InterpolatedPath, OPTIMIZED_DURATION_FACTOR, RouteStore};

use crate::{
    DashboardStats, FleetHandle, FleetSim, NoopObserver, SUBSCRIBER_CAPACITY, SimBuilder, SimError,
    SimObserver,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config() -> FleetConfig {
    FleetConfig::default()
}

fn default_sim() -> FleetSim<UniformSelector, InterpolatedPath> {
    SimBuilder::new(config()).build().unwrap()
}

/// Always selects the same driver.
struct Fixed(DriverId);

impl DriverSelector for Fixed {
    fn select(&self, _fleet: &FleetStore, _rng: &mut SimRng) -> Option<DriverId> {
        Some(self.0)
    }
}

/// Uniform selection that counts how often it is consulted.
struct Counting(Arc<AtomicUsize>);

impl DriverSelector for Counting {
    fn select(&self, fleet: &FleetStore, rng: &mut SimRng) -> Option<DriverId> {
        self.0.fetch_add(1, Ordering::SeqCst);
        UniformSelector.select(fleet, rng)
    }
}

#[derive(Default)]
struct Recorder {
    starts:      Vec<Tick>,
    transitions: Vec<(Tick, Transition)>,
    ends:        Vec<(Tick, DashboardStats)>,
    snapshots:   Vec<Tick>,
    finished:    Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }
    fn on_transition(&mut self, tick: Tick, transition: &Transition) {
        self.transitions.push((tick, *transition));
    }
    fn on_tick_end(&mut self, tick: Tick, stats: &DashboardStats) {
        self.ends.push((tick, *stats));
    }
    fn on_snapshot(&mut self, tick: Tick, _clock: &SimClock, _fleet: &FleetStore, _routes: &RouteStore) {
        self.snapshots.push(tick);
    }
    fn on_sim_end(&mut self, final_tick: Tick) {
        self.finished = Some(final_tick);
    }
}

/// One idle driver and one pending delivery.
fn lone_idle_driver(config: &FleetConfig) -> FleetSim<UniformSelector, InterpolatedPath> {
    let mut rng = SimRng::new(config.seed);
    let (mut store, rngs) = FleetBuilder::new(config).drivers(1).deliveries(0).build(&mut rng);
    let id = store.next_delivery_id();
    store.push_delivery(random_delivery(id, &mut rng, config.center, 0.02, config.start_unix_secs));
    SimBuilder::new(config.clone()).fleet(store, rngs).build().unwrap()
}

/// Assert every cross-entity invariant that must hold between ticks.
fn assert_invariants<S: DriverSelector>(sim: &FleetSim<S, InterpolatedPath>) {
    let fleet = sim.fleet();
    let stats = sim.stats();
    assert_eq!(stats.idle_drivers + stats.active_drivers, stats.total_drivers);
    assert_eq!(stats.total_drivers, fleet.drivers.len());
    assert_eq!(stats.total_deliveries, fleet.deliveries.len());

    for driver in &fleet.drivers {
        let route = sim.route(driver.id);
        if driver.status.carries_delivery() {
            assert!(route.is_some(), "{} is {} without a route", driver.id, driver.status);
            let delivery = driver
                .current_delivery
                .and_then(|id| fleet.delivery(id))
                .expect("carrying driver has a delivery");
            assert_eq!(delivery.assigned_driver, Some(driver.id));
            assert_eq!(delivery.status, DeliveryStatus::InTransit);
        } else {
            assert!(route.is_none(), "{} is {} with a route", driver.id, driver.status);
            assert_eq!(driver.current_delivery, None);
        }
    }

    for route in sim.routes().iter() {
        assert!(route.is_well_ordered());
        assert!(fleet.drivers[route.driver.index()].status.carries_delivery());
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn default_setup_matches_reference_fleet() {
        let sim = default_sim();
        let fleet = sim.fleet();
        assert_eq!(fleet.drivers.len(), 8);
        assert_eq!(fleet.deliveries.len(), 6);

        for i in 0..6u32 {
            assert_eq!(fleet.drivers[i as usize].current_delivery, Some(DeliveryId(i)));
            assert_eq!(fleet.deliveries[i as usize].assigned_driver, Some(DriverId(i)));
        }
        assert_eq!(fleet.drivers[6].status, DriverStatus::Idle);
        assert_eq!(fleet.drivers[7].status, DriverStatus::Idle);
        assert!(fleet.drivers.iter().all(|d| d.completed_deliveries == 0));
        assert_eq!(sim.current_tick(), Tick::ZERO);
    }

    #[test]
    fn routes_planned_for_bound_drivers_only() {
        let sim = default_sim();
        assert_eq!(sim.routes().len(), 6);
        assert!(sim.route(DriverId(6)).is_none());
        let route = sim.route(DriverId(0)).unwrap();
        assert_eq!(route.waypoints.len(), 3);
        assert_eq!(route.polyline.len(), 17);
        assert!(!route.is_optimized);
        assert_invariants(&sim);
    }

    #[test]
    fn initial_stats_are_aggregated() {
        let stats = *default_sim().stats();
        assert_eq!(stats.total_drivers, 8);
        assert_eq!(stats.active_drivers, 6);
        assert_eq!(stats.idle_drivers, 2);
        assert_eq!(stats.total_deliveries, 6);
        assert_eq!(stats.completed_deliveries, 0);
        assert_eq!(stats.pending_deliveries, 0);
        assert_eq!(stats.avg_delivery_time_mins, 24.5);
        assert_eq!(stats.on_time_rate, 0.94);
    }

    #[test]
    fn zero_dispatch_interval_is_rejected() {
        let config = FleetConfig { dispatch_interval_ticks: 0, ..config() };
        assert!(matches!(SimBuilder::new(config).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn non_positive_bounds_are_rejected() {
        let config = FleetConfig { bounds_half_deg: 0.0, ..config() };
        assert!(matches!(SimBuilder::new(config).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn rng_count_mismatch_errors() {
        let config = config();
        let mut rng = SimRng::new(1);
        let (store, _) = FleetBuilder::new(&config).drivers(3).build(&mut rng);
        let (_, rngs) = FleetBuilder::new(&config).drivers(2).build(&mut rng);
        let result = SimBuilder::new(config).fleet(store, rngs).build();
        assert!(matches!(
            result,
            Err(SimError::DriverCountMismatch { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = default_sim();
        let mut b = default_sim();
        a.run_ticks(200, &mut NoopObserver);
        b.run_ticks(200, &mut NoopObserver);
        assert_eq!(a.snapshot(), b.snapshot());
    }
}

// ── Tick phases ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_tests {
    use super::*;

    #[test]
    fn ticks_are_one_based() {
        let mut sim = default_sim();
        assert_eq!(sim.step(&mut NoopObserver), Tick(1));
        assert_eq!(sim.step(&mut NoopObserver), Tick(2));
        assert_eq!(sim.clock().elapsed_secs(), 4);
    }

    #[test]
    fn idle_driver_is_dispatched_to_pending_delivery() {
        let config = FleetConfig { dispatch_interval_ticks: 1, ..config() };
        let mut sim = lone_idle_driver(&config);
        assert!(sim.route(DriverId(0)).is_none());

        sim.step(&mut NoopObserver);

        let driver = &sim.fleet().drivers[0];
        let delivery = &sim.fleet().deliveries[0];
        assert_eq!(driver.status, DriverStatus::EnRoute);
        assert_eq!(delivery.status, DeliveryStatus::InTransit);
        assert_eq!(delivery.assigned_driver, Some(driver.id));

        let route = sim.route(DriverId(0)).unwrap();
        let eta = sim.clock().current_unix_secs() + route.duration_secs.round() as i64;
        assert_eq!(delivery.estimated_arrival_unix_secs, eta);
        assert_invariants(&sim);
    }

    #[test]
    fn delivering_driver_completes_and_drops_route() {
        let config = FleetConfig { dispatch_interval_ticks: 1, ..config() };
        let mut sim = SimBuilder::new(config).selector(Fixed(DriverId(1))).build().unwrap();
        assert_eq!(sim.fleet().drivers[1].status, DriverStatus::Delivering);

        sim.step(&mut NoopObserver);

        let driver = &sim.fleet().drivers[1];
        assert_eq!(driver.status, DriverStatus::Returning);
        assert_eq!(driver.completed_deliveries, 1);
        assert_eq!(driver.current_delivery, None);
        assert_eq!(sim.fleet().deliveries[1].status, DeliveryStatus::Delivered);
        assert!(sim.route(DriverId(1)).is_none());
        assert_eq!(sim.stats().completed_deliveries, 1);
        assert_invariants(&sim);
    }

    #[test]
    fn eta_is_fixed_when_the_delivery_is_picked_up() {
        let config = FleetConfig { dispatch_interval_ticks: 1, ..config() };
        let mut sim = lone_idle_driver(&config);

        sim.step(&mut NoopObserver);
        let eta = sim.fleet().deliveries[0].estimated_arrival_unix_secs;
        let first_route = sim.route(DriverId(0)).unwrap().id;

        sim.step(&mut NoopObserver);
        assert_eq!(sim.fleet().drivers[0].status, DriverStatus::Delivering);
        assert_ne!(sim.route(DriverId(0)).unwrap().id, first_route);
        assert_eq!(sim.fleet().deliveries[0].estimated_arrival_unix_secs, eta);
    }

    #[test]
    fn en_route_to_delivering_replans() {
        let config = FleetConfig { dispatch_interval_ticks: 1, ..config() };
        let mut sim = SimBuilder::new(config).selector(Fixed(DriverId(0))).build().unwrap();
        let before = sim.route(DriverId(0)).unwrap().id;

        sim.step(&mut NoopObserver);

        assert_eq!(sim.fleet().drivers[0].status, DriverStatus::Delivering);
        assert_ne!(sim.route(DriverId(0)).unwrap().id, before);
    }

    #[test]
    fn twenty_ticks_evaluate_dispatch_four_times() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut sim = SimBuilder::new(config())
            .selector(Counting(Arc::clone(&calls)))
            .build()
            .unwrap();

        let mut recorder = Recorder::default();
        for _ in 0..20 {
            let before: Vec<_> = sim.fleet().drivers.iter().map(|d| d.status).collect();
            sim.step(&mut recorder);
            let changed = sim
                .fleet()
                .drivers
                .iter()
                .zip(&before)
                .filter(|(d, s)| d.status != **s)
                .count();
            assert!(changed <= 1);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert!(recorder.transitions.len() <= 4);
        assert!(recorder.transitions.iter().all(|(t, _)| t.0 % 5 == 0));
    }

    #[test]
    fn idle_drivers_stay_put_and_en_route_drivers_move() {
        let config = FleetConfig { dispatch_interval_ticks: 1_000, ..config() };
        let mut sim = SimBuilder::new(config).build().unwrap();
        let idle_start = sim.fleet().drivers[6].location;

        for _ in 0..20 {
            let before = sim.fleet().drivers[0].location;
            sim.step(&mut NoopObserver);
            let after = sim.fleet().drivers[0].location;
            assert_ne!(after, before);
            assert!(before.distance_m(after) < 50.0);
        }
        assert_eq!(sim.fleet().drivers[6].location, idle_start);
    }

    #[test]
    fn invariants_hold_over_a_long_run() {
        let config = FleetConfig {
            dispatch_interval_ticks: 1,
            order_interval_ticks:    7,
            ..config()
        };
        let mut sim = SimBuilder::new(config).build().unwrap();
        for t in 0..600u32 {
            sim.step(&mut NoopObserver);
            if t % 11 == 0 {
                sim.optimize_route(DriverId(t % 8));
            }
            assert_invariants(&sim);
        }
        assert!(sim.stats().completed_deliveries > 0);
    }

    #[test]
    fn order_spawner_appends_pending_orders() {
        let config = FleetConfig {
            dispatch_interval_ticks: 1_000,
            order_interval_ticks:    3,
            ..config()
        };
        let mut sim = SimBuilder::new(config).build().unwrap();
        sim.run_ticks(9, &mut NoopObserver);

        let fleet = sim.fleet();
        assert_eq!(fleet.deliveries.len(), 9);
        let spawned = &fleet.deliveries[6];
        assert_eq!(spawned.id, DeliveryId(6));
        assert_eq!(spawned.order_number, "ORD-1007");
        assert_eq!(spawned.status, DeliveryStatus::Pending);
        assert_eq!(spawned.created_unix_secs, 1_700_000_000 + 3 * 2);
        assert_eq!(sim.stats().pending_deliveries, 3);
    }

    #[test]
    fn observer_hooks_fire_in_order() {
        let config = FleetConfig { output_interval_ticks: 4, ..config() };
        let mut sim = SimBuilder::new(config).build().unwrap();
        let mut recorder = Recorder::default();
        sim.run_ticks(10, &mut recorder);

        assert_eq!(recorder.starts, (1..=10).map(Tick).collect::<Vec<_>>());
        assert_eq!(recorder.ends.len(), 10);
        assert_eq!(recorder.snapshots, vec![Tick(4), Tick(8)]);
        assert_eq!(recorder.finished, Some(Tick(10)));
        let (last_tick, last_stats) = recorder.ends[9];
        assert_eq!(last_tick, Tick(10));
        assert_eq!(&last_stats, sim.stats());
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod command_tests {
    use super::*;

    #[test]
    fn selecting_a_carrying_driver_selects_its_delivery() {
        let mut sim = default_sim();
        sim.select_driver(Some(DriverId(2)));
        assert_eq!(sim.selected_driver(), Some(DriverId(2)));
        assert_eq!(sim.selected_delivery(), Some(DeliveryId(2)));

        let snap = sim.snapshot();
        assert_eq!(snap.selected_route().unwrap().driver, DriverId(2));
    }

    #[test]
    fn selecting_an_idle_driver_clears_delivery() {
        let mut sim = default_sim();
        sim.select_driver(Some(DriverId(2)));
        sim.select_driver(Some(DriverId(7)));
        assert_eq!(sim.selected_driver(), Some(DriverId(7)));
        assert_eq!(sim.selected_delivery(), None);
    }

    #[test]
    fn unknown_or_none_clears_selection() {
        let mut sim = default_sim();
        sim.select_driver(Some(DriverId(1)));
        sim.select_driver(Some(DriverId(99)));
        assert_eq!((sim.selected_driver(), sim.selected_delivery()), (None, None));

        sim.select_driver(Some(DriverId(1)));
        sim.select_driver(None);
        assert_eq!((sim.selected_driver(), sim.selected_delivery()), (None, None));
    }

    #[test]
    fn selection_has_no_side_effects() {
        let mut a = default_sim();
        let mut b = default_sim();
        a.select_driver(Some(DriverId(3)));
        a.run_ticks(50, &mut NoopObserver);
        b.run_ticks(50, &mut NoopObserver);
        assert_eq!(a.fleet().drivers, b.fleet().drivers);
        assert_eq!(a.fleet().deliveries, b.fleet().deliveries);
    }

    #[test]
    fn optimize_existing_route() {
        let mut sim = default_sim();
        let before = sim.route(DriverId(0)).unwrap().clone();

        assert!(sim.optimize_route(DriverId(0)));

        let after = sim.route(DriverId(0)).unwrap();
        assert!(after.is_optimized);
        assert!((after.duration_secs - before.duration_secs * OPTIMIZED_DURATION_FACTOR).abs() < 1e-9);
        assert_eq!(after.waypoints.first(), before.waypoints.first());
        assert_eq!(after.waypoints.last(), before.waypoints.last());
    }

    #[test]
    fn optimize_without_route_is_noop() {
        let mut sim = default_sim();
        assert!(!sim.optimize_route(DriverId(6)));
        assert!(!sim.optimize_route(DriverId(42)));
        assert_eq!(sim.routes().len(), 6);
    }
}

// ── Stats ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stats_tests {
    use super::*;

    #[test]
    fn aggregate_counts_by_status() {
        let config = config();
        let mut rng = SimRng::new(3);
        let (mut store, _) = FleetBuilder::new(&config).drivers(5).deliveries(7).build(&mut rng);
        store.deliveries[0].status = DeliveryStatus::Delivered;
        store.deliveries[1].status = DeliveryStatus::Delivered;
        store.drivers[0].status = DriverStatus::Returning;
        store.drivers[1].status = DriverStatus::Idle;

        let stats = DashboardStats::aggregate(&store, &config);
        assert_eq!(stats.total_drivers, 5);
        assert_eq!(stats.active_drivers, 4);
        assert_eq!(stats.idle_drivers, 1);
        assert_eq!(stats.total_deliveries, 7);
        assert_eq!(stats.completed_deliveries, 2);
        assert_eq!(stats.pending_deliveries, 2);
    }

    #[test]
    fn empty_fleet() {
        let stats = DashboardStats::aggregate(&FleetStore::default(), &config());
        assert_eq!(stats.total_drivers, 0);
        assert_eq!(stats.idle_drivers, 0);
        assert_eq!(stats.total_deliveries, 0);
    }
}

// ── FleetHandle ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod handle_tests {
    use super::*;

    const FAST: Duration = Duration::from_millis(5);
    const WAIT: Duration = Duration::from_secs(5);

    fn handle() -> FleetHandle {
        FleetHandle::new(default_sim()).with_interval(FAST)
    }

    #[test]
    fn interval_defaults_to_tick_duration() {
        let handle = FleetHandle::new(default_sim());
        assert_eq!(handle.interval(), Duration::from_secs(2));
        assert!(!handle.is_running());
    }

    #[test]
    fn start_ticks_and_stop_halts() {
        let handle = handle();
        let updates = handle.subscribe();
        handle.start().unwrap();
        assert!(handle.is_running());

        let first = updates.recv_timeout(WAIT).unwrap();
        let second = updates.recv_timeout(WAIT).unwrap();
        assert!(second.tick > first.tick);

        handle.stop();
        assert!(!handle.is_running());
        let stopped_at = handle.current_tick();
        std::thread::sleep(FAST * 10);
        assert_eq!(handle.current_tick(), stopped_at);
    }

    #[test]
    fn stop_is_idempotent_and_start_is_noop_when_running() {
        let handle = handle();
        handle.stop();
        handle.start().unwrap();
        handle.start().unwrap();
        assert!(handle.is_running());
        handle.stop();
        handle.stop();
        assert!(!handle.is_running());
    }

    #[test]
    fn restart_continues_from_current_tick() {
        let handle = handle();
        let updates = handle.subscribe();
        handle.start().unwrap();
        updates.recv_timeout(WAIT).unwrap();
        handle.stop();
        let paused = handle.current_tick();
        while updates.try_recv().is_ok() {}

        handle.start().unwrap();
        let next = loop {
            let snap = updates.recv_timeout(WAIT).unwrap();
            if snap.tick > paused {
                break snap.tick;
            }
        };
        assert_eq!(next, Tick(paused.0 + 1));
    }

    #[test]
    fn observer_runs_on_ticker_thread() {
        let recorder = Arc::new(parking_lot::Mutex::new(Recorder::default()));
        let handle = handle();
        let updates = handle.subscribe();
        handle.start_with_observer(Arc::clone(&recorder)).unwrap();
        for _ in 0..3 {
            updates.recv_timeout(WAIT).unwrap();
        }
        handle.stop();

        let recorder = recorder.lock();
        assert!(recorder.starts.len() >= 3);
        assert_eq!(recorder.finished, Some(handle.current_tick()));
    }

    #[test]
    fn lagging_subscriber_never_blocks_and_closed_ones_are_pruned() {
        let handle = FleetHandle::new(default_sim()).with_interval(Duration::from_millis(2));
        let slow = handle.subscribe();
        drop(handle.subscribe());
        assert_eq!(handle.subscriber_count(), 2);

        handle.start().unwrap();
        let target = Tick(2 * SUBSCRIBER_CAPACITY as u64);
        let deadline = Instant::now() + WAIT;
        while handle.current_tick() < target && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        handle.stop();

        assert!(handle.current_tick() >= target, "ticker stalled at {}", handle.current_tick());
        assert_eq!(slow.len(), SUBSCRIBER_CAPACITY);
        assert_eq!(handle.subscriber_count(), 1);

        // The buffer holds the oldest snapshots; later ones were skipped.
        let first = slow.try_recv().unwrap();
        assert_eq!(first.tick, Tick(1));
    }

    #[test]
    fn commands_are_serialised_with_ticks() {
        let handle = handle();
        handle.select_driver(Some(DriverId(0)));
        assert!(handle.optimize_route(DriverId(0)));
        assert!(!handle.optimize_route(DriverId(7)));

        let snap = handle.snapshot();
        assert_eq!(snap.selected_driver, Some(DriverId(0)));
        assert!(snap.route_for(DriverId(0)).unwrap().is_optimized);
        assert_eq!(handle.with_sim(|sim| sim.routes().len()), 6);
    }

    #[test]
    fn dropping_a_running_handle_stops_it() {
        let handle = handle();
        let updates = handle.subscribe();
        handle.start().unwrap();
        updates.recv_timeout(WAIT).unwrap();
        drop(handle);
        // Every sender is gone once the ticker has exited.
        while updates.recv_timeout(WAIT).is_ok() {}
    }
}
