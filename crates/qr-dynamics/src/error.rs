//! Error types for dynamics construction and evaluation.

use thiserror::Error;

/// Errors raised by model construction and derivative evaluation.
///
/// Every variant signals caller misuse; none is transient.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DynamicsError {
    #[error("Invalid bounds for {what}: min={min} exceeds max={max}")]
    InvalidBounds {
        what: &'static str,
        min: f64,
        max: f64,
    },

    #[error("State dimension {dim} out of range for model with {state_dim} states")]
    DimensionOutOfRange { dim: usize, state_dim: usize },

    #[error("Shape mismatch for {what}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Length mismatch for {what}: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}

pub type DynamicsResult<T> = Result<T, DynamicsError>;

impl From<qr_core::CoreError> for DynamicsError {
    fn from(e: qr_core::CoreError) -> Self {
        match e {
            qr_core::CoreError::NonFinite { what, value } => DynamicsError::NonFinite { what, value },
            qr_core::CoreError::InvalidBounds { what, min, max } => {
                DynamicsError::InvalidBounds { what, min, max }
            }
            qr_core::CoreError::NonPositive { what, value } => {
                DynamicsError::NonPositive { what, value }
            }
        }
    }
}

/// Check a container length against the dimension a model declares.
pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> DynamicsResult<()> {
    if expected != actual {
        return Err(DynamicsError::LengthMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}
