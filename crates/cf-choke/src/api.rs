//! Per-call numeric functions.
//!
//! Plain `f64` in and out, pressures in atm and rates in kg/h, with the
//! default [`StandardFluidModel`]. Inverse functions return `0.0` for
//! over-critical requests (a `warn!` is emitted); use [`InverseSolver`]
//! directly to tell that apart from a genuine zero.

use crate::correlation::Method;
use crate::error::{ChokeError, ChokeResult};
use crate::inverse::InverseSolver;
use crate::mixture::ChokeCase;
use cf_fluids::StandardFluidModel;

/// Mass rate [kg/h] through the choke.
pub fn mass_rate_kghr(
    method: Method,
    case: &ChokeCase,
    p1_atm: f64,
    p2_atm: f64,
) -> ChokeResult<f64> {
    let model = StandardFluidModel::default();
    let estimate = method.correlation().flow(&model, case, p1_atm, p2_atm)?;
    Ok(estimate.kg_per_hour())
}

/// Critical mass rate [kg/h] at `p1_atm`.
///
/// Fails with `NotSupported` for [`Method::Chien`].
pub fn critical_mass_rate_kghr(method: Method, case: &ChokeCase, p1_atm: f64) -> ChokeResult<f64> {
    let model = StandardFluidModel::default();
    method
        .correlation()
        .critical_flow(&model, case, p1_atm)?
        .map(|estimate| estimate.kg_per_hour())
        .ok_or(ChokeError::NotSupported {
            what: "correlation has no critical flow model",
        })
}

/// Upstream pressure [atm] delivering `w_kghr` against `p2_atm`.
pub fn upstream_pressure_atm(
    method: Method,
    case: &ChokeCase,
    w_kghr: f64,
    p2_atm: f64,
) -> ChokeResult<f64> {
    let model = StandardFluidModel::default();
    let correlation = method.correlation();
    let solution =
        InverseSolver::new(correlation.as_ref(), &model, case).upstream_pressure(w_kghr, p2_atm)?;
    Ok(solution.pressure_atm)
}

/// Downstream pressure [atm] for `w_kghr` at `p1_atm`; `0.0` if over-critical.
pub fn downstream_pressure_atm(
    method: Method,
    case: &ChokeCase,
    w_kghr: f64,
    p1_atm: f64,
) -> ChokeResult<f64> {
    let model = StandardFluidModel::default();
    let correlation = method.correlation();
    let solution =
        InverseSolver::new(correlation.as_ref(), &model, case).downstream_pressure(w_kghr, p1_atm)?;
    Ok(solution.pressure_atm)
}

/// Pressure drop [atm] for `w_kghr` at `p1_atm`; `0.0` if over-critical.
pub fn pressure_drop_atm(
    method: Method,
    case: &ChokeCase,
    w_kghr: f64,
    p1_atm: f64,
) -> ChokeResult<f64> {
    let model = StandardFluidModel::default();
    let correlation = method.correlation();
    let solution =
        InverseSolver::new(correlation.as_ref(), &model, case).pressure_drop(w_kghr, p1_atm)?;
    Ok(solution.pressure_atm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixture::Mixture;

    #[test]
    fn chien_has_no_critical_rate() {
        let case = ChokeCase::new(Mixture::steam(1.0));
        let err = critical_mass_rate_kghr(Method::Chien, &case, 20.0).unwrap_err();
        assert!(matches!(err, ChokeError::NotSupported { .. }));
    }

    #[test]
    fn chien_steam_reference_case() {
        let case = ChokeCase::new(Mixture::steam(1.0));
        let w = mass_rate_kghr(Method::Chien, &case, 20.0, 10.0).unwrap();
        assert!((w - 225.0).abs() < 10.0, "w = {w}");
    }
}
