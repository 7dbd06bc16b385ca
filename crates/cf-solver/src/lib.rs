//! Scalar root finding for inverting choke correlations.
//!
//! Two pieces:
//! - `solve_scalar`: derivative-free Newton iteration (finite-difference slope)
//!   with bounds, backtracking and a bisection safeguard once a sign change
//!   has been seen.
//! - `iterate_coefficients`: a capped fixed-point loop for problems whose
//!   coefficients depend on the root being sought.
//!
//! Neither routine treats non-convergence as an error. Both return the last
//! iterate together with a `converged` flag so callers can decide how strict
//! to be.

pub mod error;
pub mod fixed_point;
pub mod newton;

pub use error::{SolverError, SolverResult};
pub use fixed_point::{FixedPointConfig, FixedPointResult, iterate_coefficients};
pub use newton::{NewtonConfig, RootResult, solve_scalar};
