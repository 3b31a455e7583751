//! Error types for trajectory rollout.

use qr_dynamics::DynamicsError;
use thiserror::Error;

/// Errors encountered while rolling a model forward.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what} (t={t})")]
    NonPhysical { what: &'static str, t: f64 },

    #[error("Dynamics error: {0}")]
    Dynamics(#[from] DynamicsError),
}

pub type SimResult<T> = Result<T, SimError>;
