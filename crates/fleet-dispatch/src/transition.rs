//! The record of one applied status change.

use fleet_core::{DeliveryId, DriverId, DriverStatus};

/// One driver moving one step around the status cycle.
///
/// `delivery` is the order involved in the step: the one just bound
/// (`Idle → EnRoute`), carried (`EnRoute → Delivering`) or completed
/// (`Delivering → Returning`).  `None` for `Returning → Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub driver:   DriverId,
    pub from:     DriverStatus,
    pub to:       DriverStatus,
    pub delivery: Option<DeliveryId>,
}

impl Transition {
    /// `true` when the driver's route must be regenerated (or dropped) as a
    /// result of this step.
    #[inline]
    pub fn affects_route(&self) -> bool {
        self.from.carries_delivery() || self.to.carries_delivery()
    }
}
