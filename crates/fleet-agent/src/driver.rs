//! The courier entity.

use fleet_core::{DeliveryId, DriverId, DriverStatus, GeoPoint, VehicleType};

/// One courier.
///
/// Position and heading are owned by the movement advancer; status,
/// `current_delivery` and `completed_deliveries` are owned by dispatch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub location: GeoPoint,
    /// Degrees in `[0, 360)`; 0 is north, 90 is east.
    pub heading_deg: f64,
    pub status: DriverStatus,
    pub vehicle: VehicleType,
    pub current_delivery: Option<DeliveryId>,
    /// Never decreases.
    pub completed_deliveries: u32,
}

impl Driver {
    /// A fresh idle driver with no delivery history.
    pub fn new(
        id: DriverId,
        name: impl Into<String>,
        location: GeoPoint,
        heading_deg: f64,
        vehicle: VehicleType,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            heading_deg,
            status: DriverStatus::Idle,
            vehicle,
            current_delivery: None,
            completed_deliveries: 0,
        }
    }
}
