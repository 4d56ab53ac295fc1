//! The four-state dispatch cycle applied to a single driver.

use fleet_agent::FleetStore;
use fleet_core::{DeliveryStatus, DriverId, DriverStatus};

use crate::Transition;

/// Advance `driver` one step around `Idle → EnRoute → Delivering → Returning`.
///
/// | From         | Effect                                                           |
/// |--------------|------------------------------------------------------------------|
/// | `Idle`       | Bind the lowest-id pending delivery; it becomes `InTransit`.     |
/// |              | No pending delivery: nothing happens.                            |
/// | `EnRoute`    | Arrives: `Delivering`.                                           |
/// | `Delivering` | Delivery becomes `Delivered`; `completed_deliveries += 1`;       |
/// |              | `current_delivery` cleared (the delivery keeps its driver).      |
/// | `Returning`  | Back to `Idle`.                                                  |
///
/// Returns the applied [`Transition`], or `None` if nothing changed (unknown
/// driver, or an idle driver with no work available).
pub fn advance_driver(store: &mut FleetStore, driver: DriverId) -> Option<Transition> {
    let from = store.driver(driver)?.status;

    let delivery = match from {
        DriverStatus::Idle => {
            let pending = store.first_pending()?;
            store.bind(driver, pending);
            store.deliveries[pending.index()].status = DeliveryStatus::InTransit;
            Some(pending)
        }
        DriverStatus::EnRoute => store.drivers[driver.index()].current_delivery,
        DriverStatus::Delivering => {
            let d = &mut store.drivers[driver.index()];
            d.completed_deliveries += 1;
            let done = d.current_delivery.take();
            if let Some(delivery) = done.and_then(|id| store.delivery_mut(id)) {
                delivery.status = DeliveryStatus::Delivered;
            }
            done
        }
        DriverStatus::Returning => None,
    };

    let to = from.next();
    store.drivers[driver.index()].status = to;

    Some(Transition { driver, from, to, delivery })
}
