//! Route geometry: three key points in, a jittered polyline out.
//!
//! # Shape
//!
//! The default [`InterpolatedPath`] produces `2 × segments + 1` points:
//!
//! ```text
//! origin ──8 steps──▶ pickup ──8 steps──▶ dropoff
//!   t = 0/8 … 8/8        t = 1/8 … 8/8
//! ```
//!
//! Every point is offset by an independent uniform value in
//! `±jitter_deg` on both axes.  The jitter is purely visual; a builder with
//! `jitter_deg = 0.0` yields the exact straight-line legs and consumes no
//! randomness.

use fleet_core::{GeoPoint, SimRng};

use crate::Polyline;

/// Interpolation steps per leg of the default builder.
pub const SEGMENTS: usize = 8;

/// Default per-point offset, in degrees (~100 m).
pub const DEFAULT_JITTER_DEG: f64 = 0.001;

/// The output of a [`PathBuilder`]: the path and its length.
#[derive(Debug, Clone, PartialEq)]
pub struct PathGeometry {
    pub polyline: Polyline,
    /// Sum of haversine distances between consecutive polyline points.
    pub distance_m: f64,
}

impl PathGeometry {
    /// Wrap `polyline`, measuring its length.
    pub fn from_polyline(polyline: Polyline) -> Self {
        let distance_m = polyline.distance_m();
        Self { polyline, distance_m }
    }
}

/// Pluggable route geometry.
///
/// Implementations must be stateless: the same inputs and the same RNG state
/// must give the same geometry.  Any randomness is drawn from `rng` so runs
/// stay reproducible under a fixed seed.
pub trait PathBuilder: Send + Sync {
    /// Build a path from `origin` via `pickup` to `dropoff`.
    fn build(
        &self,
        origin:  GeoPoint,
        pickup:  GeoPoint,
        dropoff: GeoPoint,
        rng:     &mut SimRng,
    ) -> PathGeometry;
}

// ── InterpolatedPath ──────────────────────────────────────────────────────────

/// Straight-line legs with a small random wobble per point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolatedPath {
    /// Interpolation steps per leg.
    pub segments: usize,
    /// Maximum per-point offset on each axis, in degrees.
    pub jitter_deg: f64,
}

impl Default for InterpolatedPath {
    fn default() -> Self {
        Self {
            segments:   SEGMENTS,
            jitter_deg: DEFAULT_JITTER_DEG,
        }
    }
}

impl InterpolatedPath {
    /// Default segment count with the given jitter.
    pub fn with_jitter(jitter_deg: f64) -> Self {
        Self { jitter_deg, ..Self::default() }
    }

    /// Exact geometry: no jitter, no randomness consumed.
    pub fn exact() -> Self {
        Self::with_jitter(0.0)
    }

    fn jitter(&self, point: GeoPoint, rng: &mut SimRng) -> GeoPoint {
        if self.jitter_deg <= 0.0 {
            return point;
        }
        point.offset(rng.symmetric(self.jitter_deg), rng.symmetric(self.jitter_deg))
    }
}

impl PathBuilder for InterpolatedPath {
    fn build(
        &self,
        origin:  GeoPoint,
        pickup:  GeoPoint,
        dropoff: GeoPoint,
        rng:     &mut SimRng,
    ) -> PathGeometry {
        let segments = self.segments.max(1);
        let steps = segments as f64;

        let mut points = Vec::with_capacity(2 * segments + 1);
        for i in 0..=segments {
            points.push(self.jitter(origin.lerp(pickup, i as f64 / steps), rng));
        }
        for i in 1..=segments {
            points.push(self.jitter(pickup.lerp(dropoff, i as f64 / steps), rng));
        }

        PathGeometry::from_polyline(Polyline::new(points))
    }
}
