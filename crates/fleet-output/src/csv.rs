//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `driver_snapshots.csv`
//! - `tick_stats.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DriverSnapshotRow, OutputResult, TickStatsRow};

pub const SNAPSHOT_HEADERS: [&str; 12] = [
    "driver_id",
    "tick",
    "unix_time_secs",
    "status",
    "vehicle",
    "lat",
    "lon",
    "heading_deg",
    "current_delivery",
    "completed_deliveries",
    "has_route",
    "route_optimized",
];

pub const TICK_STATS_HEADERS: [&str; 9] = [
    "tick",
    "unix_time_secs",
    "total_deliveries",
    "completed_deliveries",
    "pending_deliveries",
    "total_drivers",
    "active_drivers",
    "idle_drivers",
    "transitions",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    stats:     Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) the two CSV files in it and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("driver_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADERS)?;

        let mut stats = Writer::from_path(dir.join("tick_stats.csv"))?;
        stats.write_record(TICK_STATS_HEADERS)?;

        Ok(Self {
            snapshots,
            stats,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[DriverSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.driver_id.to_string(),
                row.tick.to_string(),
                row.unix_time_secs.to_string(),
                row.status.to_string(),
                row.vehicle.to_string(),
                format!("{:.6}", row.lat),
                format!("{:.6}", row.lon),
                format!("{:.2}", row.heading_deg),
                row.current_delivery.map(|d| d.to_string()).unwrap_or_default(),
                row.completed_deliveries.to_string(),
                (row.has_route as u8).to_string(),
                (row.route_optimized as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_stats(&mut self, row: &TickStatsRow) -> OutputResult<()> {
        self.stats.write_record(&[
            row.tick.to_string(),
            row.unix_time_secs.to_string(),
            row.total_deliveries.to_string(),
            row.completed_deliveries.to_string(),
            row.pending_deliveries.to_string(),
            row.total_drivers.to_string(),
            row.active_drivers.to_string(),
            row.idle_drivers.to_string(),
            row.transitions.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.stats.flush()?;
        Ok(())
    }
}
