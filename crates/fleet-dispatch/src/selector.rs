//! The `DriverSelector` trait — which driver advances on an eligible tick.

use fleet_agent::FleetStore;
use fleet_core::{DriverId, SimRng};

/// Pluggable choice of the single driver to advance on a dispatch tick.
///
/// The simulation calls [`select`][Self::select] once per eligible tick and
/// applies exactly one state-machine step to the returned driver.  Returning
/// `None` skips the tick's dispatch entirely.
///
/// Implementations must be deterministic given the same fleet and rng state;
/// any randomness must come from the supplied [`SimRng`].
///
/// # Example
///
/// ```rust,ignore
/// /// Always advance the driver with the fewest completed deliveries.
/// struct LeastBusy;
///
/// impl DriverSelector for LeastBusy {
///     fn select(&self, fleet: &FleetStore, _rng: &mut SimRng) -> Option<DriverId> {
///         fleet.drivers.iter().min_by_key(|d| d.completed_deliveries).map(|d| d.id)
///     }
/// }
/// ```
pub trait DriverSelector: Send + Sync + 'static {
    fn select(&self, fleet: &FleetStore, rng: &mut SimRng) -> Option<DriverId>;
}

/// Picks any driver with equal probability, regardless of status.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformSelector;

impl DriverSelector for UniformSelector {
    fn select(&self, fleet: &FleetStore, rng: &mut SimRng) -> Option<DriverId> {
        rng.index(fleet.drivers.len()).map(|i| fleet.drivers[i].id)
    }
}
