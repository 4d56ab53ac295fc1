use fleet_core::FleetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid fleet configuration: {0}")]
    Config(#[from] FleetError),

    #[error("driver rng count {got} does not match driver count {expected}")]
    DriverCountMismatch {
        expected: usize,
        got:      usize,
    },

    #[error("could not spawn ticker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
