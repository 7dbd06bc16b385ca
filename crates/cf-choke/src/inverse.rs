//! Pressure-from-flow inversion shared by every correlation.
//!
//! Each query wraps the forward model as `flow(unknown) - target` and hands it
//! to the bounded scalar Newton solver. For correlations with a choking model
//! a downstream or differential-pressure request larger than the critical flow
//! at p1 cannot be met; those return a zero pressure with
//! [`InverseStatus::ExceedsCritical`] and a `warn!` diagnostic.

use crate::common::{MIN_PRESSURE_ATM, check_finite, validate_pressures};
use crate::correlation::ChokeCorrelation;
use crate::error::{ChokeError, ChokeResult};
use crate::mixture::ChokeCase;
use cf_fluids::FluidModel;
use cf_solver::{NewtonConfig, RootResult, solve_scalar};
use tracing::{trace, warn};

/// Offset below p1 used to seed the downstream-pressure search [atm]
const DOWNSTREAM_SEED_OFFSET_ATM: f64 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InverseStatus {
    Solved,
    /// Requested flow exceeds the critical flow at p1; the pressure is the
    /// zero sentinel
    ExceedsCritical,
}

/// Outcome of an inverse query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureSolution {
    /// Pressure or pressure drop [atm]; zero when the request is over-critical
    pub pressure_atm: f64,
    pub converged: bool,
    pub iterations: usize,
    /// Critical flow at p1 [kg/h], for correlations with a choking model
    pub critical_kghr: Option<f64>,
    pub status: InverseStatus,
}

impl PressureSolution {
    fn solved(root: RootResult, critical_kghr: Option<f64>) -> Self {
        Self {
            pressure_atm: root.x,
            converged: root.converged,
            iterations: root.iterations,
            critical_kghr,
            status: InverseStatus::Solved,
        }
    }

    fn closed_form(pressure_atm: f64) -> Self {
        Self {
            pressure_atm,
            converged: true,
            iterations: 0,
            critical_kghr: None,
            status: InverseStatus::Solved,
        }
    }

    fn exceeds_critical(critical_kghr: f64) -> Self {
        Self {
            pressure_atm: 0.0,
            converged: false,
            iterations: 0,
            critical_kghr: Some(critical_kghr),
            status: InverseStatus::ExceedsCritical,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.status == InverseStatus::Solved
    }
}

/// Inverts one correlation for one fluid case.
pub struct InverseSolver<'a> {
    correlation: &'a dyn ChokeCorrelation,
    model: &'a dyn FluidModel,
    case: &'a ChokeCase,
    config: NewtonConfig,
}

impl<'a> InverseSolver<'a> {
    pub fn new(
        correlation: &'a dyn ChokeCorrelation,
        model: &'a dyn FluidModel,
        case: &'a ChokeCase,
    ) -> Self {
        Self {
            correlation,
            model,
            case,
            config: NewtonConfig::default(),
        }
    }

    /// Replace the root-search settings. Bounds are set per query.
    pub fn with_config(mut self, config: NewtonConfig) -> Self {
        self.config = config;
        self
    }

    fn flow_kghr(&self, p1_atm: f64, p2_atm: f64) -> ChokeResult<f64> {
        let w = self
            .correlation
            .flow(self.model, self.case, p1_atm, p2_atm)?
            .kg_per_hour();
        trace!(p1_atm, p2_atm, w_kghr = w, "inverse probe");
        Ok(w)
    }

    fn critical_kghr(&self, p1_atm: f64) -> ChokeResult<Option<f64>> {
        Ok(self
            .correlation
            .critical_flow(self.model, self.case, p1_atm)?
            .map(|est| est.kg_per_hour()))
    }

    /// Zero-pressure sentinel when `w_kghr` exceeds the critical flow.
    fn sentinel(
        &self,
        w_kghr: f64,
        p1_atm: f64,
        critical_kghr: Option<f64>,
    ) -> Option<PressureSolution> {
        let w_crit = critical_kghr?;
        if w_kghr <= w_crit {
            return None;
        }
        warn!(
            correlation = self.correlation.name(),
            mixture = self.case.mixture.label(),
            w_kghr,
            w_crit_kghr = w_crit,
            p1_atm,
            "requested flow exceeds critical flow at this upstream pressure"
        );
        Some(PressureSolution::exceeds_critical(w_crit))
    }

    /// Upstream pressure [atm] that delivers `w_kghr` against `p2_atm`.
    ///
    /// Flow keeps rising with p1 even when choked, so there is no critical
    /// override here.
    pub fn upstream_pressure(&self, w_kghr: f64, p2_atm: f64) -> ChokeResult<PressureSolution> {
        validate_rate(w_kghr)?;
        validate_pressures(1.0, p2_atm)?;
        let lower = p2_atm.max(MIN_PRESSURE_ATM);

        let config = self.config.with_bounds(lower, f64::INFINITY);
        let root = solve_scalar(
            lower,
            |p1| -> ChokeResult<f64> { Ok(self.flow_kghr(p1, p2_atm)? - w_kghr) },
            &config,
        )?;
        check_finite(root.x, "upstream pressure")?;
        Ok(PressureSolution::solved(root, None))
    }

    /// Downstream pressure [atm] at which `w_kghr` leaves a choke fed at
    /// `p1_atm`.
    pub fn downstream_pressure(&self, w_kghr: f64, p1_atm: f64) -> ChokeResult<PressureSolution> {
        validate_rate(w_kghr)?;
        validate_pressures(p1_atm, 0.0)?;

        if let Some(p2) = self
            .correlation
            .downstream_pressure(self.model, self.case, p1_atm, w_kghr)?
        {
            return Ok(PressureSolution::closed_form(p2));
        }
        let critical_kghr = self.critical_kghr(p1_atm)?;
        if let Some(sentinel) = self.sentinel(w_kghr, p1_atm, critical_kghr) {
            return Ok(sentinel);
        }

        let config = self.config.with_bounds(MIN_PRESSURE_ATM, p1_atm);
        let seed = (p1_atm - DOWNSTREAM_SEED_OFFSET_ATM).max(MIN_PRESSURE_ATM);
        let root = solve_scalar(
            seed,
            |p2| -> ChokeResult<f64> { Ok(self.flow_kghr(p1_atm, p2)? - w_kghr) },
            &config,
        )?;
        Ok(PressureSolution::solved(root, critical_kghr))
    }

    /// Pressure drop p1 - p2 [atm] that passes `w_kghr` at `p1_atm`.
    pub fn pressure_drop(&self, w_kghr: f64, p1_atm: f64) -> ChokeResult<PressureSolution> {
        validate_rate(w_kghr)?;
        validate_pressures(p1_atm, 0.0)?;

        if let Some(p2) = self
            .correlation
            .downstream_pressure(self.model, self.case, p1_atm, w_kghr)?
        {
            return Ok(PressureSolution::closed_form(p1_atm - p2));
        }
        let critical_kghr = self.critical_kghr(p1_atm)?;
        if let Some(sentinel) = self.sentinel(w_kghr, p1_atm, critical_kghr) {
            return Ok(sentinel);
        }

        let config = self
            .config
            .with_bounds(0.0, (p1_atm - MIN_PRESSURE_ATM).max(0.0));
        let root = solve_scalar(
            0.0,
            |dp| -> ChokeResult<f64> { Ok(self.flow_kghr(p1_atm, p1_atm - dp)? - w_kghr) },
            &config,
        )?;
        Ok(PressureSolution::solved(root, critical_kghr))
    }
}

fn validate_rate(w_kghr: f64) -> ChokeResult<()> {
    if !w_kghr.is_finite() || w_kghr < 0.0 {
        return Err(ChokeError::InvalidArg {
            what: "mass rate must be non-negative",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alsafran::AlSafran;
    use crate::chien::Chien;
    use crate::mixture::Mixture;
    use cf_fluids::StandardFluidModel;

    #[test]
    fn zero_rate_recovers_downstream_pressure() {
        let model = StandardFluidModel::default();
        let case = ChokeCase::new(Mixture::gas_water(0.5));
        let chien = Chien::default();
        let solver = InverseSolver::new(&chien, &model, &case);

        let sol = solver.upstream_pressure(0.0, 30.0).unwrap();
        assert!(sol.converged);
        assert_eq!(sol.pressure_atm, 30.0);
    }

    #[test]
    fn chien_downstream_is_closed_form() {
        let model = StandardFluidModel::default();
        let case = ChokeCase::new(Mixture::gas_water(0.5));
        let chien = Chien::default();
        let solver = InverseSolver::new(&chien, &model, &case);

        let sol = solver.downstream_pressure(50.0, 100.0).unwrap();
        assert_eq!(sol.iterations, 0);
        assert!(sol.is_solved());
        assert!((sol.pressure_atm - 100.0).abs() < 1.0);

        let drop = solver.pressure_drop(50.0, 100.0).unwrap();
        assert!((drop.pressure_atm - (100.0 - sol.pressure_atm)).abs() < 1e-12);
    }

    #[test]
    fn over_critical_request_returns_sentinel() {
        let model = StandardFluidModel::default();
        let case = ChokeCase::new(Mixture::steam(1.0));
        let correlation = AlSafran::default();
        let solver = InverseSolver::new(&correlation, &model, &case);

        let sol = solver.downstream_pressure(10_000.0, 10.0).unwrap();
        assert_eq!(sol.status, InverseStatus::ExceedsCritical);
        assert_eq!(sol.pressure_atm, 0.0);
        assert!(sol.critical_kghr.unwrap() < 10_000.0);

        let drop = solver.pressure_drop(10_000.0, 10.0).unwrap();
        assert_eq!(drop.status, InverseStatus::ExceedsCritical);
        assert_eq!(drop.pressure_atm, 0.0);
    }

    #[test]
    fn negative_rate_is_rejected() {
        let model = StandardFluidModel::default();
        let case = ChokeCase::new(Mixture::gas_oil(0.5));
        let correlation = AlSafran::default();
        let solver = InverseSolver::new(&correlation, &model, &case);
        assert!(matches!(
            solver.upstream_pressure(-5.0, 10.0),
            Err(ChokeError::InvalidArg { .. })
        ));
    }
}
