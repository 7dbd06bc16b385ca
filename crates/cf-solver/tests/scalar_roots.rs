//! Property tests for the scalar root finder.

use cf_solver::{NewtonConfig, SolverResult, solve_scalar};
use proptest::prelude::*;

proptest! {
    #[test]
    fn recovers_root_of_saturating_curve(target in 0.05_f64..0.95_f64, seed in 0.0_f64..0.5_f64) {
        // Rises like sqrt, then stays flat past x = 1
        let residual = |x: f64| -> SolverResult<f64> { Ok(x.clamp(0.0, 1.0).sqrt() - target) };
        let config = NewtonConfig::default().with_bounds(0.0, 10.0);
        let result = solve_scalar(seed, residual, &config).unwrap();

        prop_assert!(result.converged);
        prop_assert!((result.x - target * target).abs() < 1e-7);
    }

    #[test]
    fn cubic_roots(root in -50.0_f64..50.0_f64) {
        let residual = |x: f64| -> SolverResult<f64> { Ok((x - root).powi(3) + (x - root)) };
        let result = solve_scalar(0.0, residual, &NewtonConfig::default()).unwrap();

        prop_assert!(result.converged);
        prop_assert!((result.x - root).abs() < 1e-6);
    }
}
