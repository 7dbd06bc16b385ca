//! Derivative-free scalar Newton solver with bounds and a bisection safeguard.

use crate::error::SolverError;
use tracing::{debug, trace};

/// Scalar Newton solver configuration.
#[derive(Clone, Copy, Debug)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance on the residual
    pub abs_tol: f64,
    /// Residual tolerance relative to the residual at the seed
    pub rel_tol: f64,
    /// Relative step below which the iteration stops
    pub step_tol: f64,
    /// Residual (relative to the seed residual) accepted when the step stalls
    pub stall_rel_tol: f64,
    /// Relative finite-difference step used for the slope
    pub fd_step: f64,
    /// Lower bound on x
    pub lower: f64,
    /// Upper bound on x
    pub upper: f64,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            abs_tol: 1e-10,
            rel_tol: 1e-12,
            step_tol: 1e-12,
            stall_rel_tol: 1e-6,
            fd_step: 1e-7,
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
            line_search_beta: 0.5,
            max_line_search_iters: 30,
        }
    }
}

impl NewtonConfig {
    /// Restrict iterates to `[lower, upper]`.
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    fn clamp(&self, x: f64) -> f64 {
        x.max(self.lower).min(self.upper)
    }
}

/// Outcome of a scalar root search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootResult {
    /// Last iterate
    pub x: f64,
    /// Residual at `x`
    pub residual: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Converged flag
    pub converged: bool,
}

#[derive(Clone, Copy, Debug)]
struct Bracket {
    lo: f64,
    f_lo: f64,
    hi: f64,
}

impl Bracket {
    fn new(a: f64, fa: f64, b: f64, fb: f64) -> Self {
        if a < b {
            Self { lo: a, f_lo: fa, hi: b }
        } else {
            Self { lo: b, f_lo: fb, hi: a }
        }
    }

    fn contains(&self, x: f64) -> bool {
        x > self.lo && x < self.hi
    }

    fn midpoint(&self) -> f64 {
        0.5 * (self.lo + self.hi)
    }

    fn width(&self) -> f64 {
        self.hi - self.lo
    }

    /// Replace the endpoint whose residual has the same sign as `fx`.
    fn shrink(&mut self, x: f64, fx: f64) {
        if same_sign(fx, self.f_lo) {
            self.lo = x;
            self.f_lo = fx;
        } else {
            self.hi = x;
        }
    }
}

fn same_sign(a: f64, b: f64) -> bool {
    (a < 0.0) == (b < 0.0)
}

/// Find a root of `residual` starting from `x0`.
///
/// The slope is a forward finite difference (backward at the upper bound).
/// Until a sign change has been observed, a step is backtracked until the
/// residual shrinks or changes sign. Afterwards the root is bracketed and any
/// Newton step leaving the bracket (or a flat slope) is replaced by bisection.
///
/// Running out of iterations is not an error: the last iterate is returned
/// with `converged == false`. Errors from `residual` are propagated.
pub fn solve_scalar<F, E>(x0: f64, mut residual: F, config: &NewtonConfig) -> Result<RootResult, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<SolverError>,
{
    if !x0.is_finite() || config.lower > config.upper || config.lower.is_nan() {
        return Err(SolverError::ProblemSetup {
            what: "seed must be finite and bounds ordered",
        }
        .into());
    }

    let mut x = config.clamp(x0);
    let mut fx = residual(x)?;
    if !fx.is_finite() {
        return Err(SolverError::NonFiniteResidual { x }.into());
    }

    let f0 = fx.abs();
    let target = config.abs_tol.max(config.rel_tol * f0);
    let stall_target = target.max(config.stall_rel_tol * f0);
    let mut bracket: Option<Bracket> = None;

    let stop = |x: f64, fx: f64, iterations: usize, converged: bool| {
        if !converged {
            debug!(x, residual = fx, iterations, "scalar root search did not converge");
        }
        RootResult {
            x,
            residual: fx,
            iterations,
            converged,
        }
    };

    for iter in 0..config.max_iterations {
        if fx.abs() <= target {
            return Ok(stop(x, fx, iter, true));
        }

        let mut h = config.fd_step * x.abs().max(1.0);
        if x + h > config.upper {
            h = -h;
        }
        let slope = (residual(x + h)? - fx) / h;
        let newton = if slope.is_finite() && slope != 0.0 {
            x - fx / slope
        } else {
            f64::NAN
        };

        let mut candidate = match &bracket {
            Some(b) if newton.is_finite() && b.contains(newton) => newton,
            Some(b) => b.midpoint(),
            None if newton.is_finite() => newton,
            None => return Ok(stop(x, fx, iter, false)),
        };
        candidate = config.clamp(candidate);

        let mut f_candidate = residual(candidate)?;
        let mut backtracks = 0;
        while backtracks < config.max_line_search_iters {
            let acceptable = f_candidate.is_finite()
                && (bracket.is_some()
                    || f_candidate.abs() < fx.abs()
                    || !same_sign(fx, f_candidate));
            if acceptable {
                break;
            }
            candidate = x + config.line_search_beta * (candidate - x);
            f_candidate = residual(candidate)?;
            backtracks += 1;
        }
        if !f_candidate.is_finite() {
            return Ok(stop(x, fx, iter, false));
        }

        if !same_sign(fx, f_candidate) {
            bracket = Some(Bracket::new(x, fx, candidate, f_candidate));
        } else if let Some(b) = bracket.as_mut() {
            b.shrink(candidate, f_candidate);
        }

        let step = (candidate - x).abs();
        x = candidate;
        fx = f_candidate;
        trace!(iter, x, residual = fx, backtracks, "newton step");

        let scale = x.abs().max(1.0);
        if let Some(b) = &bracket {
            if b.width() <= config.step_tol * scale {
                return Ok(stop(x, fx, iter + 1, true));
            }
        }
        if step <= config.step_tol * scale {
            return Ok(stop(x, fx, iter + 1, fx.abs() <= stall_target));
        }
    }

    let converged = fx.abs() <= target;
    Ok(stop(x, fx, config.max_iterations, converged))
}
