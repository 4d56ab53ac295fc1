//! `fleet-agent` — driver and delivery entities and their storage.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`driver`]     | `Driver` — one courier                                     |
//! | [`delivery`]   | `Delivery` — one order                                     |
//! | [`store`]      | `FleetStore` (drivers + deliveries), `DriverRngs`          |
//! | [`builder`]    | `FleetBuilder` — synthesises the initial fleet and orders  |
//!
//! Drivers and deliveries are indexed by their ids: `store.drivers[id.index()]`
//! is the driver with that id.  Neither collection ever shrinks during a run.

pub mod builder;
pub mod delivery;
pub mod driver;
pub mod store;


pub use builder::{FleetBuilder, placement_spread, random_delivery};
pub use delivery::Delivery;
pub use driver::Driver;
pub use store::{DriverRngs, FleetStore};
