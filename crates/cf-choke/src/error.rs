//! Error types for choke calculations.

use cf_core::error::CfError;
use cf_fluids::FluidError;
use cf_solver::SolverError;
use thiserror::Error;

/// Errors that can occur during choke calculations.
///
/// Over-critical inverse requests are not errors; they are reported through
/// [`crate::inverse::InverseStatus`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChokeError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    #[error("Fluid property error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
}

pub type ChokeResult<T> = Result<T, ChokeError>;

impl From<ChokeError> for CfError {
    fn from(e: ChokeError) -> Self {
        match e {
            ChokeError::NonPhysical { what } => CfError::Invariant { what },
            ChokeError::InvalidArg { what } => CfError::InvalidArg { what },
            ChokeError::NotSupported { what } => CfError::InvalidArg { what },
            ChokeError::Fluid(err) => err.into(),
            ChokeError::Solver(err) => err.into(),
        }
    }
}
