//! Common utilities for choke calculations.

use crate::error::{ChokeError, ChokeResult};
use cf_core::numeric::ensure_finite;

/// π as used by the fitted throat-area expressions
pub const FIT_PI: f64 = 3.14;

/// Lowest downstream pressure a root search may probe [atm]
pub const MIN_PRESSURE_ATM: f64 = 1e-9;

/// Ensure a value is finite, returning ChokeError if not.
pub fn check_finite(value: f64, what: &'static str) -> ChokeResult<()> {
    ensure_finite(value, what).map_err(|_| ChokeError::NonPhysical { what })?;
    Ok(())
}

/// Clamp a mass fraction into [0, 1]; non-finite input is rejected.
pub fn clamp_fraction(value: f64, what: &'static str) -> ChokeResult<f64> {
    if !value.is_finite() {
        return Err(ChokeError::InvalidArg { what });
    }
    Ok(value.clamp(0.0, 1.0))
}

/// Upstream pressure must be positive, downstream non-negative, both finite.
pub fn validate_pressures(p1_atm: f64, p2_atm: f64) -> ChokeResult<()> {
    if !p1_atm.is_finite() || p1_atm <= 0.0 {
        return Err(ChokeError::InvalidArg {
            what: "upstream pressure must be positive",
        });
    }
    if !p2_atm.is_finite() || p2_atm < 0.0 {
        return Err(ChokeError::InvalidArg {
            what: "downstream pressure must be non-negative",
        });
    }
    Ok(())
}

/// Throat area from a bore diameter, in the square of the diameter unit.
pub fn throat_area(d: f64) -> f64 {
    FIT_PI * d * d / 4.0
}
