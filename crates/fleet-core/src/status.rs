//! Driver and delivery status enums.
//!
//! Drivers cycle through one fixed loop:
//!
//! ```text
//! Idle → EnRoute → Delivering → Returning → Idle
//! ```
//!
//! The predicates on [`DriverStatus`] are the single source of truth for
//! "does this driver move", "does it own a route" and "does it carry a
//! delivery"; every other crate asks them rather than matching variants.

/// The dispatch state of one driver.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DriverStatus {
    /// Waiting for work; carries nothing and does not move.
    #[default]
    Idle,
    /// Travelling towards the pickup / dropoff of its delivery.
    EnRoute,
    /// At the dropoff, handing the parcel over.  Stationary.
    Delivering,
    /// Heading back after a completed delivery.
    Returning,
}

impl DriverStatus {
    /// The status a driver moves to on its next dispatch step.
    pub fn next(self) -> DriverStatus {
        match self {
            DriverStatus::Idle       => DriverStatus::EnRoute,
            DriverStatus::EnRoute    => DriverStatus::Delivering,
            DriverStatus::Delivering => DriverStatus::Returning,
            DriverStatus::Returning  => DriverStatus::Idle,
        }
    }

    /// `true` for statuses in which the movement advancer moves the driver.
    #[inline]
    pub fn is_moving(self) -> bool {
        matches!(self, DriverStatus::EnRoute | DriverStatus::Returning)
    }

    /// `true` for statuses in which the driver is bound to a delivery and
    /// owns a route.
    #[inline]
    pub fn carries_delivery(self) -> bool {
        matches!(self, DriverStatus::EnRoute | DriverStatus::Delivering)
    }

    /// `true` for every status except `Idle`.
    #[inline]
    pub fn is_active(self) -> bool {
        !matches!(self, DriverStatus::Idle)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DriverStatus::Idle       => "idle",
            DriverStatus::EnRoute    => "en_route",
            DriverStatus::Delivering => "delivering",
            DriverStatus::Returning  => "returning",
        }
    }
}

impl std::fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The lifecycle state of one delivery order.
///
/// `Assigned`, `PickedUp` and `Failed` are part of the order model that
/// consumers render; the dispatch loop itself moves orders
/// `Pending → InTransit → Delivered`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeliveryStatus {
    #[default]
    Pending,
    Assigned,
    PickedUp,
    InTransit,
    Delivered,
    Failed,
}

impl DeliveryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryStatus::Pending   => "pending",
            DeliveryStatus::Assigned  => "assigned",
            DeliveryStatus::PickedUp  => "picked_up",
            DeliveryStatus::InTransit => "in_transit",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Failed    => "failed",
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
