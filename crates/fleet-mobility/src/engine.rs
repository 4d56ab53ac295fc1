//! The movement engine: advances every moving driver once per tick.

use fleet_agent::{Driver, DriverRngs, FleetStore};
use fleet_core::geo::METERS_PER_DEGREE;
use fleet_core::{DriverRng, FleetConfig, GeoPoint, VehicleType};
use tracing::trace;

use crate::{MovementSummary, StepOutcome};

/// Movement parameters for one run.
///
/// Holds no per-driver state; positions and headings live on the drivers and
/// randomness comes from each driver's own [`DriverRng`].
#[derive(Debug, Clone, PartialEq)]
pub struct MovementEngine {
    /// Centre of the square service area.
    pub center: GeoPoint,
    /// Half-width of the service area, in degrees.
    pub half_deg: f64,
    /// Simulated seconds covered by one tick.
    pub tick_secs: f64,
    /// Maximum heading change per tick, in degrees.
    pub heading_jitter_deg: f64,
}

impl MovementEngine {
    pub fn new(config: &FleetConfig) -> Self {
        Self {
            center:             config.center,
            half_deg:           config.bounds_half_deg,
            tick_secs:          config.tick_duration_secs as f64,
            heading_jitter_deg: config.heading_jitter_deg,
        }
    }

    /// Distance one tick covers for `vehicle`, in degrees.
    #[inline]
    pub fn step_deg(&self, vehicle: VehicleType) -> f64 {
        vehicle.speed_mps() * self.tick_secs / METERS_PER_DEGREE
    }

    /// Advance one driver.
    pub fn advance_driver(&self, driver: &mut Driver, rng: &mut DriverRng) -> StepOutcome {
        if !driver.status.is_moving() {
            return StepOutcome::Stationary;
        }

        driver.heading_deg = normalize_heading(driver.heading_deg + rng.symmetric(self.heading_jitter_deg));

        let step = self.step_deg(driver.vehicle);
        let radians = driver.heading_deg.to_radians();
        let (d_lat, d_lon) = (step * radians.cos(), step * radians.sin());
        let candidate = driver.location.offset(d_lat, d_lon);

        if candidate.within_bbox(self.center, self.half_deg) {
            driver.location = candidate;
            StepOutcome::Moved { d_lat, d_lon }
        } else {
            driver.heading_deg = rng.gen_range(0.0..360.0);
            trace!(driver = %driver.id, heading = driver.heading_deg, "bounced off service area edge");
            StepOutcome::Bounced
        }
    }

    /// Advance every driver in `store` by one tick.
    ///
    /// `rngs` must be index-aligned with `store.drivers`.
    pub fn advance_all(&self, store: &mut FleetStore, rngs: &mut DriverRngs) -> MovementSummary {
        debug_assert_eq!(store.drivers.len(), rngs.len());

        #[cfg(not(feature = "parallel"))]
        {
            store
                .drivers
                .iter_mut()
                .zip(rngs.inner.iter_mut())
                .map(|(driver, rng)| MovementSummary::from_outcome(self.advance_driver(driver, rng)))
                .fold(MovementSummary::default(), |acc, s| acc + s)
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            store
                .drivers
                .par_iter_mut()
                .zip(rngs.inner.par_iter_mut())
                .map(|(driver, rng)| MovementSummary::from_outcome(self.advance_driver(driver, rng)))
                .reduce(MovementSummary::default, |a, b| a + b)
        }
    }
}

/// Wrap an angle into `[0, 360)`.
fn normalize_heading(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round a tiny negative input up to exactly 360.0.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
