//! Route reordering heuristic.
//!
//! This is deliberately not a shortest-path or TSP solver.  The first and
//! last waypoints stay put; everything in between is sorted by straight-line
//! distance from the first waypoint, once.  The duration is then scaled by a
//! fixed [`OPTIMIZED_DURATION_FACTOR`] rather than re-measured, and callers
//! rely on exactly that scaling.

use std::cmp::Ordering;

use fleet_core::SimRng;
use tracing::debug;

use crate::{PathBuilder, Route};

/// Optimised routes are assumed to take this fraction of their prior duration.
pub const OPTIMIZED_DURATION_FACTOR: f64 = 0.85;

/// Reorder `route`'s interior waypoints by distance from its origin and
/// rebuild its geometry.
///
/// The polyline is rebuilt from the first three waypoints after reordering
/// (the last waypoint stands in when a route has fewer than three).
/// Returns `false` and leaves the route untouched if it has no waypoints.
///
/// Ties keep their previous relative order (stable sort).
pub fn optimize_route<P: PathBuilder>(route: &mut Route, builder: &P, rng: &mut SimRng) -> bool {
    let n = route.waypoints.len();
    if n == 0 {
        return false;
    }

    if n > 2 {
        let origin = route.waypoints[0].location;
        route.waypoints[1..n - 1].sort_by(|a, b| {
            origin
                .distance_m(a.location)
                .partial_cmp(&origin.distance_m(b.location))
                .unwrap_or(Ordering::Equal)
        });
    }
    route.renumber();

    let at = |i: usize| route.waypoints[i.min(n - 1)].location;
    let geometry = builder.build(at(0), at(1), at(2), rng);
    route.set_geometry(geometry);

    route.duration_secs *= OPTIMIZED_DURATION_FACTOR;
    route.is_optimized = true;

    debug!(
        driver = %route.driver,
        route = %route.id,
        waypoints = n,
        distance_m = route.distance_m,
        duration_secs = route.duration_secs,
        "route optimised"
    );
    true
}
