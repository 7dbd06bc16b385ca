//! Al-Safran & Kelkar two-phase choke correlation.
//!
//! Polytropic gas expansion with slip between the phases. The critical
//! pressure ratio is the root of a scalar equation in the ratio; the throat
//! ratio used for the flow is the larger of that root and p2/p1.

use crate::common::{check_finite, throat_area, validate_pressures};
use crate::correlation::{ChokeCorrelation, FlowEstimate};
use crate::error::ChokeResult;
use crate::mixture::ChokeCase;
use crate::state::FluidState;
use cf_core::units::{field, kgph};
use cf_fluids::FluidModel;
use cf_solver::{NewtonConfig, RootResult, solve_scalar};

/// Gas fraction used in place of zero, since the slip terms divide by it
const MIN_GAS_FRACTION: f64 = 1e-4;

/// Seed for the critical-ratio search
const RATIO_SEED: f64 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct AlSafran {
    /// Discharge coefficient Cd
    pub discharge_coefficient: f64,
    /// Gravitational constant as fitted [m/s²]
    pub gc: f64,
    /// Root search for the critical pressure ratio
    pub ratio_solver: NewtonConfig,
}

impl Default for AlSafran {
    fn default() -> Self {
        Self {
            discharge_coefficient: 0.75,
            gc: 9.8,
            ratio_solver: NewtonConfig::default().with_bounds(1e-9, 1.0),
        }
    }
}

/// Mixture terms evaluated at p1.
#[derive(Debug, Clone, Copy)]
struct SlipTerms {
    x: f64,
    vg: f64,
    /// Slip correction factor
    r: f64,
    /// Slip-weighted liquid-to-gas volume ratio
    alfa: f64,
    /// Polytropic exponent of the mixture
    n: f64,
}

impl SlipTerms {
    fn evaluate(model: &dyn FluidModel, case: &ChokeCase, p1_atm: f64) -> ChokeResult<Self> {
        case.validate()?;
        let x = case.mixture.gas_fraction()?.max(MIN_GAS_FRACTION);
        let state = FluidState::evaluate(model, case, field::pressure(p1_atm))?;

        let vg = state.gas.specific_volume();
        let vl = state.liquid_specific_volume();
        let cvg = state.gas.cv;
        let k = state.gas.cp / cvg;
        let cl = state.liquid_cv();

        let r = (1.0 + x * (vg / vl - 1.0)).sqrt() * (1.0 + 0.6 / 2.718_f64.powf(5.0 * x));
        let alfa = r * (1.0 - x) * vl / (x * vg);
        let n = (x * k * cvg + (1.0 - x) * cl) / (x * cvg + (1.0 - x) * cl);

        let terms = Self { x, vg, r, alfa, n };
        check_finite(terms.alfa, "slip volume ratio")?;
        check_finite(terms.n, "polytropic exponent")?;
        Ok(terms)
    }

    /// Residual whose root is the critical pressure ratio.
    fn critical_residual(&self, pr: f64) -> f64 {
        let (n, alfa) = (self.n, self.alfa);
        let m = n / (n - 1.0);
        let throat = 1.0 + alfa * pr.powf(1.0 / n);
        (alfa * (1.0 - pr) + m) / (m + n / 2.0 * throat * throat) - pr.powf(1.0 - 1.0 / n)
    }
}

impl AlSafran {
    fn critical_ratio(&self, terms: &SlipTerms) -> ChokeResult<RootResult> {
        let root = solve_scalar(
            RATIO_SEED,
            |pr| -> ChokeResult<f64> { Ok(terms.critical_residual(pr)) },
            &self.ratio_solver,
        )?;
        Ok(root)
    }

    fn mass_rate_kghr(&self, case: &ChokeCase, terms: &SlipTerms, p1_atm: f64, pr: f64) -> f64 {
        let SlipTerms { x, vg, r, alfa, n } = *terms;
        let area = throat_area(case.geometry.choke_diameter_mm / 1000.0);
        let ab = n / (n - 1.0) * (1.0 - pr.powf((n - 1.0) / n)) + alfa * (1.0 - pr);
        let vt = pr.powf(-1.0 / n) + alfa;
        let ac = x * vg * vt * vt * (x + (1.0 - x) / r);
        let cd = self.discharge_coefficient;
        area * (288.0 * self.gc * cd * cd * 100.0 * p1_atm * ab / ac).sqrt() * 3600.0
    }

    fn estimate(
        &self,
        model: &dyn FluidModel,
        case: &ChokeCase,
        p1_atm: f64,
        p2_atm: Option<f64>,
    ) -> ChokeResult<FlowEstimate> {
        let terms = SlipTerms::evaluate(model, case, p1_atm)?;
        let root = self.critical_ratio(&terms)?;
        let rc = root.x;

        let (pr, choked) = match p2_atm {
            Some(p2) => {
                let ratio = p2 / p1_atm;
                (rc.max(ratio).min(1.0), rc >= ratio)
            }
            None => (rc.min(1.0), true),
        };
        let w = self.mass_rate_kghr(case, &terms, p1_atm, pr);
        check_finite(w, "mass flow rate")?;

        Ok(FlowEstimate {
            mass_rate: kgph(w),
            pressure_ratio: pr,
            critical_ratio: Some(rc),
            choked,
            converged: root.converged,
            iterations: 0,
        })
    }
}

impl ChokeCorrelation for AlSafran {
    fn name(&self) -> &str {
        "Al-Safran"
    }

    fn flow(
        &self,
        model: &dyn FluidModel,
        case: &ChokeCase,
        p1_atm: f64,
        p2_atm: f64,
    ) -> ChokeResult<FlowEstimate> {
        validate_pressures(p1_atm, p2_atm)?;
        self.estimate(model, case, p1_atm, Some(p2_atm))
    }

    fn critical_flow(
        &self,
        model: &dyn FluidModel,
        case: &ChokeCase,
        p1_atm: f64,
    ) -> ChokeResult<Option<FlowEstimate>> {
        validate_pressures(p1_atm, 0.0)?;
        self.estimate(model, case, p1_atm, None).map(Some)
    }
}
