//! `fleet-spatial` — routes, path geometry, and route optimisation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`polyline`]  | `Polyline` — ordered coordinates plus path length            |
//! | [`geometry`]  | `PathBuilder` trait, `InterpolatedPath`, `PathGeometry`      |
//! | [`route`]     | `Route`, `Waypoint`, `WaypointKind`, `RouteStore`            |
//! | [`optimizer`] | `optimize_route` — nearest-to-origin interior reordering     |
//!
//! # Pluggability
//!
//! Route generation and optimisation call geometry through the
//! [`PathBuilder`] trait, so an application can swap the synthetic
//! interpolated path for a road-snapped one without touching the simulation
//! core.  The default [`InterpolatedPath`] needs no map data.

pub mod geometry;
pub mod optimizer;
pub mod polyline;
pub mod route;


pub use geometry::{InterpolatedPath, PathBuilder, PathGeometry, SEGMENTS};
pub use optimizer::{OPTIMIZED_DURATION_FACTOR, optimize_route};
pub use polyline::Polyline;
pub use route::{Route, RouteStore, Waypoint, WaypointKind};
