use crate::CfError;

/// Floating point type used throughout system
pub type Real = f64;

/// Absolute and relative tolerance pair
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CfError::NonFinite { what, value: v })
    }
}

/// Replace a non-positive fraction with `floor`. Keeps the value otherwise.
pub fn floor_fraction(v: Real, floor: Real) -> Real {
    if v <= 0.0 { floor } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_uses_either_tolerance() {
        let tol = Tolerances::default();
        assert!(nearly_equal(282.0, 282.0 + 1e-8, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));

        let loose = Tolerances { abs: 1e-4, rel: 0.0 };
        assert!(nearly_equal(50.0, 50.00005, loose));
        assert!(!nearly_equal(50.0, 50.001, loose));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn floor_fraction_only_touches_non_positive() {
        assert_eq!(floor_fraction(0.0, 1e-4), 1e-4);
        assert_eq!(floor_fraction(-0.3, 1e-5), 1e-5);
        assert_eq!(floor_fraction(0.25, 1e-4), 0.25);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn floored_fraction_is_positive(v in -1.0_f64..1.0_f64, floor in 1e-6_f64..1e-3_f64) {
            prop_assert!(floor_fraction(v, floor) > 0.0);
        }
    }
}
