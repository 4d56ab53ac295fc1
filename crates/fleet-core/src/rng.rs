//! Deterministic per-driver and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each driver gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (driver_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive driver IDs uniformly across the seed space.
//! This means:
//!
//! - Heading jitter for one driver never depends on how many other drivers
//!   moved before it in the same tick.
//! - Adding drivers at the end of the fleet does not disturb the trajectories
//!   of existing drivers.
//!
//! Everything that is not per-driver (dispatch selection, route jitter, order
//! spawning, fleet synthesis) draws from [`SimRng`] streams split off one
//! root seeded with the run seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::DriverId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── DriverRng ─────────────────────────────────────────────────────────────────

/// Per-driver deterministic RNG.
///
/// Created once per driver at fleet synthesis and stored in a parallel
/// `Vec<DriverRng>` alongside the drivers.
#[derive(Clone, Debug)]
pub struct DriverRng(SmallRng);

impl DriverRng {
    /// Seed deterministically from the run's global seed and a driver ID.
    pub fn new(global_seed: u64, driver: DriverId) -> Self {
        let seed = global_seed ^ (driver.0 as u64).wrapping_mul(MIXING_CONSTANT);
        DriverRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform offset in `[-half_width, half_width]`; exactly `0.0` when
    /// `half_width` is not positive.
    #[inline]
    pub fn symmetric(&mut self, half_width: f64) -> f64 {
        if half_width > 0.0 {
            self.0.gen_range(-half_width..=half_width)
        } else {
            0.0
        }
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations.
///
/// Used only inside the single-threaded tick and from setup.  Inject a
/// specific seed through `FleetConfig::seed` to make a whole run
/// reproducible.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset, so independent
    /// phases (fleet synthesis vs. the running tick loop) get independent
    /// streams from one root seed.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform offset in `[-half_width, half_width]`; exactly `0.0` when
    /// `half_width` is not positive.
    #[inline]
    pub fn symmetric(&mut self, half_width: f64) -> f64 {
        if half_width > 0.0 {
            self.0.gen_range(-half_width..=half_width)
        } else {
            0.0
        }
    }

    /// Choose a uniformly random index into a collection of `len` items.
    /// Returns `None` if `len == 0`.
    #[inline]
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.0.gen_range(0..len))
    }
}
