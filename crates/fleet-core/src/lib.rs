//! `fleet-core` — foundational types for the `rust_fleet` dispatch simulation.
//!
//! This crate is a dependency of every other `fleet-*` crate.  It has no
//! `fleet-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `DriverId`, `DeliveryId`, `RouteId`, `WaypointId`     |
//! | [`geo`]         | `GeoPoint`, haversine distance, bounding box          |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`config`]      | `FleetConfig` — every tunable of a run                |
//! | [`rng`]         | `DriverRng` (per-driver), `SimRng` (global)           |
//! | [`vehicle`]     | `VehicleType` and its speed constants                 |
//! | [`status`]      | `DriverStatus`, `DeliveryStatus`                      |
//! | [`error`]       | `FleetError`, `FleetResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod status;
pub mod time;
pub mod vehicle;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::FleetConfig;
pub use error::{FleetError, FleetResult};
pub use geo::GeoPoint;
pub use ids::{DeliveryId, DriverId, RouteId, WaypointId};
pub use rng::{DriverRng, SimRng};
pub use status::{DeliveryStatus, DriverStatus};
pub use time::{SimClock, Tick};
pub use vehicle::VehicleType;
