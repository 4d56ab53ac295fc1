//! Polyline representation for route geometries.
//!
//! Stores decoded coordinates directly.  Any compact encoding for a renderer
//! belongs at the consumer boundary, not in the simulation core.

use fleet_core::GeoPoint;

/// An ordered coordinate sequence approximating a path.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polyline {
    points: Vec<GeoPoint>,
}

impl Polyline {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of great-circle distances between consecutive points, in metres.
    pub fn distance_m(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance_m(pair[1]))
            .sum()
    }
}
