//! Plain data row types written by output backends.

/// One driver's state at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverSnapshotRow {
    pub driver_id:            u32,
    pub tick:                 u64,
    pub unix_time_secs:       i64,
    pub status:               &'static str,
    pub vehicle:              &'static str,
    pub lat:                  f64,
    pub lon:                  f64,
    pub heading_deg:          f64,
    /// `None` while the driver carries nothing.
    pub current_delivery:     Option<u32>,
    pub completed_deliveries: u32,
    pub has_route:            bool,
    pub route_optimized:      bool,
}

/// Dashboard counters for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickStatsRow {
    pub tick:                 u64,
    pub unix_time_secs:       i64,
    pub total_deliveries:     u64,
    pub completed_deliveries: u64,
    pub pending_deliveries:   u64,
    pub total_drivers:        u64,
    pub active_drivers:       u64,
    pub idle_drivers:         u64,
    /// Status changes applied this tick (0 or 1).
    pub transitions:          u64,
}
