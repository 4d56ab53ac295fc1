//! The delivery order entity.

use fleet_core::{DeliveryId, DeliveryStatus, DriverId, GeoPoint};

/// One delivery order.
///
/// `assigned_driver` is set when a driver picks the order up and is kept
/// after completion as the historical record of who delivered it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delivery {
    pub id: DeliveryId,
    /// Human-readable order number, e.g. `ORD-1001`.
    pub order_number: String,
    pub pickup: GeoPoint,
    pub pickup_address: String,
    pub dropoff: GeoPoint,
    pub dropoff_address: String,
    pub status: DeliveryStatus,
    pub assigned_driver: Option<DriverId>,
    pub estimated_arrival_unix_secs: i64,
    pub created_unix_secs: i64,
}

impl Delivery {
    /// Order numbers start at `ORD-1001` for delivery 0.
    pub fn order_number_for(id: DeliveryId) -> String {
        format!("ORD-{}", 1001 + id.0)
    }
}
