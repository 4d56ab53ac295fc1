//! Dashboard aggregates.

use fleet_agent::FleetStore;
use fleet_core::{DeliveryStatus, FleetConfig};

/// Fleet-wide counters shown on the dashboard.
///
/// Recomputed from scratch every tick by [`DashboardStats::aggregate`]; never
/// updated incrementally.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DashboardStats {
    pub total_deliveries:     usize,
    pub completed_deliveries: usize,
    pub pending_deliveries:   usize,
    pub total_drivers:        usize,
    pub active_drivers:       usize,
    pub idle_drivers:         usize,
    /// Configured constant, not measured.
    pub avg_delivery_time_mins: f64,
    /// Configured constant, not measured.
    pub on_time_rate: f64,
}

impl DashboardStats {
    /// Count `fleet`.  Timing metrics are copied from `config`.
    pub fn aggregate(fleet: &FleetStore, config: &FleetConfig) -> Self {
        let total_drivers = fleet.drivers.len();
        let active_drivers = fleet.drivers.iter().filter(|d| d.status.is_active()).count();
        Self {
            total_deliveries:       fleet.deliveries.len(),
            completed_deliveries:   fleet.count_deliveries(DeliveryStatus::Delivered),
            pending_deliveries:     fleet.count_deliveries(DeliveryStatus::Pending),
            total_drivers,
            active_drivers,
            idle_drivers:           total_drivers - active_drivers,
            avg_delivery_time_mins: config.avg_delivery_time_mins,
            on_time_rate:           config.on_time_rate,
        }
    }
}
