//! `fleet-mobility` — courier movement between dispatch steps.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`engine`] | `MovementEngine` — advances every moving driver once per tick   |
//! | [`step`]   | `StepOutcome`, `MovementSummary`                                |
//!
//! # Movement model (flat-earth wander)
//!
//! Drivers do not follow their route polylines.  Each tick, every driver in a
//! moving status (`EnRoute`, `Returning`):
//!
//! 1. turns by a uniform random amount in `±heading_jitter_deg`;
//! 2. steps `speed × tick_secs` metres along its heading, converted to
//!    degrees with a flat-earth factor (`lat += step·cos h`, `lon += step·sin h`);
//! 3. if that step would leave the square service area, stays put and picks
//!    a brand-new random heading instead.
//!
//! Stationary drivers (`Idle`, `Delivering`) are never touched.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Advances drivers on Rayon's thread pool.               |

pub mod engine;
pub mod step;


pub use engine::MovementEngine;
pub use step::{MovementSummary, StepOutcome};
