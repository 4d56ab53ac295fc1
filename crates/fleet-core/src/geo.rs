//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Route polylines are built from
//! sub-metre interpolation steps and jitter offsets of ~0.001°, and per-tick
//! movement steps are as small as ~1e-4°, so single precision would visibly
//! quantise both.

/// Metres spanned by one degree of latitude (and of longitude at the equator).
///
/// Used by the flat-earth movement model; good enough at city scale.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        const R: f64 = 6_371_000.0; // mean Earth radius, metres

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R * c
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is
    /// `other`.  Both endpoints are reproduced exactly.
    #[inline]
    pub fn lerp(self, other: GeoPoint, t: f64) -> GeoPoint {
        GeoPoint {
            lat: self.lat * (1.0 - t) + other.lat * t,
            lon: self.lon * (1.0 - t) + other.lon * t,
        }
    }

    /// Shift by raw degree deltas.
    #[inline]
    pub fn offset(self, d_lat: f64, d_lon: f64) -> GeoPoint {
        GeoPoint {
            lat: self.lat + d_lat,
            lon: self.lon + d_lon,
        }
    }

    /// Square bounding-box check: both axes within `half_deg` of `center`.
    #[inline]
    pub fn within_bbox(self, center: GeoPoint, half_deg: f64) -> bool {
        (self.lat - center.lat).abs() <= half_deg
            && (self.lon - center.lon).abs() <= half_deg
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
