//! The `OutputWriter` trait implemented by backend writers.

use crate::{DriverSnapshotRow, OutputResult, TickStatsRow};

/// A sink for simulation output rows.
///
/// Errors are stored by [`FleetOutputObserver`][crate::FleetOutputObserver]
/// and retrieved with its `take_error`.
pub trait OutputWriter {
    /// Write a batch of driver snapshots.
    fn write_snapshots(&mut self, rows: &[DriverSnapshotRow]) -> OutputResult<()>;

    /// Write one tick's stats row.
    fn write_tick_stats(&mut self, row: &TickStatsRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
