//! Top-level simulation configuration.
//!
//! Typically built with `FleetConfig::default()` and a few field overrides,
//! or loaded from a JSON file by the application crate (enable the `serde`
//! feature).  The defaults reproduce the reference dashboard behaviour: eight
//! couriers, six orders, a two-second tick and one dispatch step every fifth
//! tick.

use crate::{FleetError, FleetResult, GeoPoint, SimClock};

/// Every tunable of one simulation run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleetConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Number of couriers synthesised at setup.
    pub driver_count: usize,

    /// Number of delivery orders synthesised at setup.
    pub delivery_count: usize,

    /// Centre of the simulated area.
    pub center: GeoPoint,

    /// Half-width, in degrees, of the square area drivers may move in.
    pub bounds_half_deg: f64,

    /// Unix timestamp for tick 0.
    pub start_unix_secs: i64,

    /// Seconds per tick.  Also the real-time ticker interval.
    pub tick_duration_secs: u32,

    /// Dispatch runs on every Nth tick.
    pub dispatch_interval_ticks: u64,

    /// Maximum heading change per tick for moving drivers, in degrees.
    pub heading_jitter_deg: f64,

    /// Maximum per-point route polyline offset, in degrees.  0 disables it.
    pub route_jitter_deg: f64,

    /// Spawn a new pending order every N ticks.  0 disables spawning.
    pub order_interval_ticks: u64,

    /// Notify snapshot observers every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,

    /// Placeholder average delivery time reported in dashboard stats.
    pub avg_delivery_time_mins: f64,

    /// Placeholder on-time rate (0–1) reported in dashboard stats.
    pub on_time_rate: f64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            seed:                    42,
            driver_count:            8,
            delivery_count:          6,
            center:                  GeoPoint::new(37.7749, -122.4194),
            bounds_half_deg:         0.05,
            start_unix_secs:         1_700_000_000,
            tick_duration_secs:      2,
            dispatch_interval_ticks: 5,
            heading_jitter_deg:      15.0,
            route_jitter_deg:        0.001,
            order_interval_ticks:    0,
            output_interval_ticks:   1,
            avg_delivery_time_mins:  24.5,
            on_time_rate:            0.94,
        }
    }
}

impl FleetConfig {
    /// Reject values the tick loop cannot run with.
    pub fn validate(&self) -> FleetResult<()> {
        if self.tick_duration_secs == 0 {
            return Err(FleetError::Config("tick_duration_secs must be at least 1".into()));
        }
        if self.dispatch_interval_ticks == 0 {
            return Err(FleetError::Config("dispatch_interval_ticks must be at least 1".into()));
        }
        if self.bounds_half_deg.is_nan() || self.bounds_half_deg <= 0.0 {
            return Err(FleetError::NotPositive {
                name:  "bounds_half_deg",
                value: self.bounds_half_deg,
            });
        }
        if self.heading_jitter_deg < 0.0 || self.route_jitter_deg < 0.0 {
            return Err(FleetError::Config("jitter values must not be negative".into()));
        }
        if !(0.0..=1.0).contains(&self.on_time_rate) {
            return Err(FleetError::Config(format!(
                "on_time_rate must be within [0, 1], got {}",
                self.on_time_rate
            )));
        }
        Ok(())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_secs, self.tick_duration_secs)
    }

    /// Real-time interval between ticks.
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.tick_duration_secs as u64)
    }
}
