//! `fleet-sim` — tick orchestration for the rust_fleet dispatch simulation.
//!
//! # One tick
//!
//! ```text
//! ① Clock     — advance; tick ordinals start at 1.
//! ② Movement  — EnRoute/Returning drivers step along their heading.
//! ③ Dispatch  — on every Nth tick, one selected driver advances a status.
//! ④ Routes    — regenerate (→ EnRoute, → Delivering) or drop (→ Returning).
//! ⑤ Orders    — optionally append a new pending delivery.
//! ⑥ Stats     — re-aggregate; notify observers and subscribers.
//! ```
//!
//! # Headless vs. real time
//!
//! [`FleetSim`] is a plain state holder driven by [`FleetSim::step`] /
//! [`FleetSim::run_ticks`].  [`FleetHandle`] wraps it in a mutex and ticks it
//! from a background thread at a fixed real-time interval.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the movement phase on Rayon's thread pool.        |
//! | `serde`    | Derives `Serialize`/`Deserialize` on snapshots.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fleet_core::FleetConfig;
//! use fleet_sim::{FleetHandle, SimBuilder};
//!
//! let sim = SimBuilder::new(FleetConfig::default()).build()?;
//! let handle = FleetHandle::new(sim);
//! let updates = handle.subscribe();
//! handle.start()?;
//! let latest = updates.recv()?;
//! println!("{} drivers active", latest.stats.active_drivers);
//! handle.stop();
//! ```

pub mod builder;
pub mod error;
pub mod handle;
pub mod observer;
pub mod sim;
pub mod snapshot;
pub mod stats;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use handle::{FleetHandle, SUBSCRIBER_CAPACITY};
pub use observer::{NoopObserver, SimObserver};
pub use sim::FleetSim;
pub use snapshot::FleetSnapshot;
pub use stats::DashboardStats;
