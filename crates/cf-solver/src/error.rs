//! Error types for solver operations.

use cf_core::error::CfError;
use thiserror::Error;

/// Errors that can occur while setting up or running a root search.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: &'static str },

    #[error("Non-finite residual at x = {x}")]
    NonFiniteResidual { x: f64 },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for CfError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::ProblemSetup { what } => CfError::InvalidArg { what },
            SolverError::NonFiniteResidual { x } => CfError::NonFinite {
                what: "residual",
                value: x,
            },
        }
    }
}
