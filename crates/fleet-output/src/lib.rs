//! `fleet-output` — simulation output writers for the rust_fleet dispatch
//! simulation.
//!
//! | Backend | Files created                                  |
//! |---------|------------------------------------------------|
//! | CSV     | `driver_snapshots.csv`, `tick_stats.csv`       |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`FleetOutputObserver`], which implements `fleet_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fleet_output::{CsvWriter, FleetOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = FleetOutputObserver::new(writer, sim.config());
//! sim.run_ticks(1_000, &mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::FleetOutputObserver;
pub use row::{DriverSnapshotRow, TickStatsRow};
pub use writer::OutputWriter;
