//! Fluid property errors.

use cf_core::CfError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during fluid property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Non-physical values (negative density, pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Value out of valid range.
    #[error("Value out of range for {what}")]
    OutOfRange { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Steam-table backend error.
    #[error("Backend error: {message}")]
    Backend { message: String },

    /// Convergence failure (e.g. Z factor iteration).
    #[error("Convergence failed for {what}")]
    ConvergenceFailed { what: &'static str },
}

impl From<FluidError> for CfError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::NonPhysical { what } => CfError::Invariant { what },
            FluidError::OutOfRange { what } => CfError::InvalidArg { what },
            FluidError::InvalidArg { what } => CfError::InvalidArg { what },
            FluidError::Backend { message: _ } => CfError::Invariant {
                what: "fluid backend error",
            },
            FluidError::ConvergenceFailed { what } => CfError::Invariant { what },
        }
    }
}
