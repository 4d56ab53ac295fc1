//! `fleet-dispatch` — the driver status state machine.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`transition`] | `Transition` — one applied status change                     |
//! | [`machine`]    | `advance_driver` — apply one step of the cycle to one driver |
//! | [`selector`]   | `DriverSelector` trait, `UniformSelector`                    |
//! | [`dispatcher`] | `Dispatcher` — eligibility gate + selector + machine         |
//!
//! # Throughput limit
//!
//! Dispatch only runs on every Nth tick, and then advances exactly one
//! driver.  Fleet-wide status churn is therefore gradual and easy to follow
//! on a dashboard.  The selection policy is pluggable; the "one driver per
//! eligible tick" rule is not.

pub mod dispatcher;
pub mod machine;
pub mod selector;
pub mod transition;


pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use machine::advance_driver;
pub use selector::{DriverSelector, UniformSelector};
pub use transition::Transition;
