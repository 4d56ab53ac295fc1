//! Framework error type.
//!
//! Runtime operations in the simulation never fail (missing preconditions are
//! no-ops), so errors only arise while validating configuration.  Sub-crates
//! wrap `FleetError` as one variant of their own enums.

use thiserror::Error;

/// The top-level error type for `fleet-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
}

/// Shorthand result type for all `fleet-*` crates.
pub type FleetResult<T> = Result<T, FleetError>;
