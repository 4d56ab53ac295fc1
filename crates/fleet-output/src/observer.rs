//! `FleetOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use fleet_agent::FleetStore;
use fleet_core::{FleetConfig, SimClock, Tick};
use fleet_dispatch::Transition;
use fleet_sim::{DashboardStats, SimObserver};
use fleet_spatial::RouteStore;

use crate::row::{DriverSnapshotRow, TickStatsRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes driver snapshots and tick stats to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After the run, check for errors with
/// [`take_error`][Self::take_error].
pub struct FleetOutputObserver<W: OutputWriter> {
    writer:             W,
    start_unix_secs:    i64,
    tick_duration_secs: u32,
    transitions:        u64,
    last_error:         Option<OutputError>,
}

impl<W: OutputWriter> FleetOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for wall-clock
    /// conversion.
    pub fn new(writer: W, config: &FleetConfig) -> Self {
        Self {
            writer,
            start_unix_secs:    config.start_unix_secs,
            tick_duration_secs: config.tick_duration_secs,
            transitions:        0,
            last_error:         None,
        }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn unix_time(&self, tick: Tick) -> i64 {
        self.start_unix_secs + tick.0 as i64 * self.tick_duration_secs as i64
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for FleetOutputObserver<W> {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.transitions = 0;
    }

    fn on_transition(&mut self, _tick: Tick, _transition: &Transition) {
        self.transitions += 1;
    }

    fn on_tick_end(&mut self, tick: Tick, stats: &DashboardStats) {
        let row = TickStatsRow {
            tick:                 tick.0,
            unix_time_secs:       self.unix_time(tick),
            total_deliveries:     stats.total_deliveries as u64,
            completed_deliveries: stats.completed_deliveries as u64,
            pending_deliveries:   stats.pending_deliveries as u64,
            total_drivers:        stats.total_drivers as u64,
            active_drivers:       stats.active_drivers as u64,
            idle_drivers:         stats.idle_drivers as u64,
            transitions:          self.transitions,
        };
        let result = self.writer.write_tick_stats(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, clock: &SimClock, fleet: &FleetStore, routes: &RouteStore) {
        let unix_time_secs = clock.current_unix_secs();
        let rows: Vec<DriverSnapshotRow> = fleet
            .drivers
            .iter()
            .map(|d| {
                let route = routes.get(d.id);
                DriverSnapshotRow {
                    driver_id:            d.id.0,
                    tick:                 tick.0,
                    unix_time_secs,
                    status:               d.status.as_str(),
                    vehicle:              d.vehicle.as_str(),
                    lat:                  d.location.lat,
                    lon:                  d.location.lon,
                    heading_deg:          d.heading_deg,
                    current_delivery:     d.current_delivery.map(|id| id.0),
                    completed_deliveries: d.completed_deliveries,
                    has_route:            route.is_some(),
                    route_optimized:      route.is_some_and(|r| r.is_optimized),
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
