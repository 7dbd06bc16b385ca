//! Capped fixed-point iteration over root-dependent coefficients.
//!
//! Some correlations need coefficients evaluated at a state that depends on
//! the root they are solving for. The loop here alternates: solve with the
//! current coefficients, re-evaluate the coefficients at that solution,
//! solve again, and stop once two successive solutions agree.

use tracing::{debug, trace};

/// Fixed-point loop configuration.
#[derive(Clone, Copy, Debug)]
pub struct FixedPointConfig {
    /// Maximum coefficient updates
    pub max_iterations: usize,
    /// Absolute tolerance between successive solutions
    pub tolerance: f64,
}

impl Default for FixedPointConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            tolerance: 1e-3,
        }
    }
}

/// Fixed-point outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedPointResult<C> {
    /// Solution the final coefficients were evaluated at
    pub value: f64,
    /// Coefficients evaluated at `value`
    pub coefficients: C,
    /// Coefficient updates performed
    pub iterations: usize,
    /// Change between the last two solutions
    pub last_change: f64,
    /// Converged flag
    pub converged: bool,
}

/// Iterate `solve` and `update` until successive solutions differ by no more
/// than the tolerance, or the iteration cap is hit.
///
/// With a cap of zero the coefficients are never updated and the first
/// solution is returned unconverged.
pub fn iterate_coefficients<C, S, U, E>(
    initial: C,
    mut solve: S,
    mut update: U,
    config: &FixedPointConfig,
) -> Result<FixedPointResult<C>, E>
where
    S: FnMut(&C) -> Result<f64, E>,
    U: FnMut(f64) -> Result<C, E>,
{
    let mut coefficients = initial;
    let mut value = solve(&coefficients)?;
    let mut last_change = f64::INFINITY;

    for iter in 1..=config.max_iterations {
        coefficients = update(value)?;
        let next = solve(&coefficients)?;
        last_change = (next - value).abs();
        trace!(iter, value, next, "fixed-point update");

        if last_change <= config.tolerance {
            return Ok(FixedPointResult {
                value,
                coefficients,
                iterations: iter,
                last_change,
                converged: true,
            });
        }
        if iter == config.max_iterations {
            break;
        }
        value = next;
    }

    debug!(
        value,
        last_change,
        max_iterations = config.max_iterations,
        "fixed-point iteration hit its cap"
    );
    Ok(FixedPointResult {
        value,
        coefficients,
        iterations: config.max_iterations,
        last_change,
        converged: false,
    })
}
