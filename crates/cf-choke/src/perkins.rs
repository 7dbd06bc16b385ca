//! Perkins polytropic choke correlation.
//!
//! Works in oilfield units (psia, ft, lbm). The throat pressure ratio solves
//! an energy/momentum balance whose polytropic exponent depends on heat
//! capacities, and those are taken at the mean of upstream and throat
//! pressure. The two are reconciled with a capped fixed-point loop.

use crate::common::{check_finite, throat_area, validate_pressures};
use crate::correlation::{ChokeCorrelation, FlowEstimate};
use crate::error::ChokeResult;
use crate::mixture::{ChokeCase, Mixture};
use crate::state::{FluidState, HeatCapacities, LiquidPhase};
use cf_core::floor_fraction;
use cf_core::units::constants::degc_to_degf;
use cf_core::units::field::{
    self, FT3_LBM_PER_M3_KG, GC, KG_PER_LBM, LBM_FT3_PER_KG_M3, MM_PER_FT, PSIA_PER_ATM,
    R_FT_LBF, heat_capacity_field,
};
use cf_core::units::kgph;
use cf_fluids::FluidModel;
use cf_solver::{FixedPointConfig, NewtonConfig, iterate_coefficients, solve_scalar};
use tracing::debug;

/// Mass fraction used in place of a zero phase share
const MIN_PHASE_FRACTION: f64 = 1e-5;

/// Seed for the throat-ratio search
const RATIO_SEED: f64 = 0.01;

const GAS_MOLAR_MASS: f64 = 16.0;
const STEAM_MOLAR_MASS: f64 = 18.0;
const STEAM_Z: f64 = 0.999;

#[derive(Debug, Clone, Copy)]
pub struct Perkins {
    /// Mean-pressure heat capacity loop
    pub fixed_point: FixedPointConfig,
    /// Root search for the throat pressure ratio
    pub ratio_solver: NewtonConfig,
}

impl Default for Perkins {
    fn default() -> Self {
        Self {
            fixed_point: FixedPointConfig::default(),
            ratio_solver: NewtonConfig::default().with_bounds(1e-6, 1.0),
        }
    }
}

/// Polytropic coefficients that depend on heat capacities.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Polytropic {
    n: f64,
    lambda: f64,
}

/// Terms fixed by the inlet state and geometry.
#[derive(Debug, Clone, Copy)]
struct Expansion {
    fg: f64,
    fo: f64,
    fw: f64,
    /// Liquid-to-gas volume ratio at the inlet
    alf: f64,
    /// Throat over pipe area
    area_ratio: f64,
    /// Throat area [ft²]
    throat_ft2: f64,
    /// Gas specific volume at the inlet [ft³/lbm]
    v1: f64,
    p1_psia: f64,
    molar_mass: f64,
    z: f64,
    /// Oil heat capacity from API gravity [ft·lbf/(lbm·°F)], three-phase only
    api_oil_cv: Option<f64>,
}

/// Liquid volume per unit gas volume contributed by one liquid component.
fn liquid_volume(phase: Option<LiquidPhase>, fraction: f64) -> f64 {
    phase.map_or(0.0, |l| fraction / (l.density.value * LBM_FT3_PER_KG_M3))
}

/// Oil "API gravity" fed to the heat-capacity fit, evaluated with the
/// correlation's own operator order: 141.5 / ρ / 1000 − 131.5.
fn fitted_api_gravity(oil_density_kgm3: f64) -> f64 {
    141.5 / oil_density_kgm3 / 1000.0 - 131.5
}

/// Oil heat capacity [ft·lbf/(lbm·°F)] from API gravity and temperature.
pub fn api_oil_heat_capacity(api: f64, t_f: f64) -> f64 {
    778.0 * ((0.355 + 0.00176 * api) + (0.0051 + 1.167e-5 * api) * t_f)
}

impl Expansion {
    fn new(case: &ChokeCase, state: &FluidState, p1_atm: f64) -> ChokeResult<Self> {
        let (fg, fo, fw) = match case.mixture {
            Mixture::GasWater { .. } | Mixture::Steam { .. } => {
                let fg = floor_fraction(case.mixture.gas_fraction()?, MIN_PHASE_FRACTION);
                (fg, 0.0, 1.0 - fg)
            }
            Mixture::GasOil { .. } => {
                let fg = floor_fraction(case.mixture.gas_fraction()?, MIN_PHASE_FRACTION);
                (fg, 1.0 - fg, 0.0)
            }
            Mixture::GasOilWater { .. } => {
                let f = case.mixture.fractions()?;
                (
                    floor_fraction(f.gas, MIN_PHASE_FRACTION),
                    floor_fraction(f.oil, MIN_PHASE_FRACTION),
                    floor_fraction(f.water, MIN_PHASE_FRACTION),
                )
            }
        };

        let v1 = FT3_LBM_PER_M3_KG / state.gas.density.value;
        let alf = (liquid_volume(state.oil, fo) + liquid_volume(state.water, fw)) / v1;

        let a1 = throat_area(case.geometry.pipe_diameter_mm / MM_PER_FT);
        let a2 = throat_area(case.geometry.choke_diameter_mm / MM_PER_FT);

        let (molar_mass, z) = match state.gas.z {
            Some(z) => (GAS_MOLAR_MASS, z),
            None => (STEAM_MOLAR_MASS, STEAM_Z),
        };

        let api_oil_cv = match (case.mixture, state.oil) {
            (Mixture::GasOilWater { .. }, Some(oil)) => {
                let api = fitted_api_gravity(oil.density.value);
                Some(api_oil_heat_capacity(api, degc_to_degf(case.pvt.temperature_c)))
            }
            _ => None,
        };

        Ok(Self {
            fg,
            fo,
            fw,
            alf,
            area_ratio: a2 / a1,
            throat_ft2: a2,
            v1,
            p1_psia: p1_atm * PSIA_PER_ATM,
            molar_mass,
            z,
            api_oil_cv,
        })
    }

    fn polytropic(&self, caps: &HeatCapacities) -> ChokeResult<Polytropic> {
        let cvg = heat_capacity_field(caps.gas_cv);
        let k = caps.gas_cp / caps.gas_cv;
        let cvo = match self.api_oil_cv {
            Some(cv) => cv,
            None => caps.oil_cv.map_or(0.0, heat_capacity_field),
        };
        let cvw = caps.water_cv.map_or(0.0, heat_capacity_field);

        let liquid = self.fo * cvo + self.fw * cvw;
        let s = self.fg * cvg + liquid;
        let coefficients = Polytropic {
            n: (self.fg * k * cvg + liquid) / s,
            lambda: self.fg + s * self.molar_mass / (self.z * R_FT_LBF),
        };
        check_finite(coefficients.n, "polytropic exponent")?;
        check_finite(coefficients.lambda, "polytropic loading")?;
        Ok(coefficients)
    }

    /// Specific volume of the mixture at the throat relative to the gas at p1.
    fn throat_volume(&self, n: f64, pr: f64) -> f64 {
        self.fg * pr.powf(-1.0 / n) + self.alf
    }

    /// Residual whose root is the throat pressure ratio.
    fn throat_residual(&self, poly: &Polytropic, pr: f64) -> f64 {
        let Polytropic { n, lambda } = *poly;
        let (fg, alf, ar) = (self.fg, self.alf, self.area_ratio);
        let g = self.throat_volume(n, pr);
        let h = (fg + alf) / g;
        let pr_term = pr.powf(-(1.0 + n) / n);

        let a = 2.0 * lambda * (1.0 - pr.powf((n - 1.0) / n)) + 2.0 * alf * (1.0 - pr);
        let b = (1.0 - ar * ar * h * h) * (fg / n * pr_term);
        let c = ar * ar * fg / n * (fg + alf) * (fg + alf) * pr_term / (g * g);
        let d = (1.0 - ar * h * h) * g;
        let e = lambda * (n - 1.0) / n * pr.powf(-1.0 / n) + alf;
        a * (b + c) - d * e
    }

    fn mass_rate_kghr(&self, poly: &Polytropic, pr: f64) -> f64 {
        let Polytropic { n, lambda } = *poly;
        let (fg, alf, ar) = (self.fg, self.alf, self.area_ratio);
        let g = self.throat_volume(n, pr);
        let h = (fg + alf) / g;

        let ab = (lambda * (1.0 - pr.powf((n - 1.0) / n)) + alf * (1.0 - pr))
            / ((1.0 - ar * ar * h * h) * g * g);
        let w_lbm_s = self.throat_ft2 * (288.0 * GC * self.p1_psia / self.v1 * ab).sqrt();
        w_lbm_s * KG_PER_LBM * 3600.0
    }
}

impl Perkins {
    fn estimate(
        &self,
        model: &dyn FluidModel,
        case: &ChokeCase,
        p1_atm: f64,
        p2_atm: Option<f64>,
    ) -> ChokeResult<FlowEstimate> {
        case.validate()?;
        let state = FluidState::evaluate(model, case, field::pressure(p1_atm))?;
        let expansion = Expansion::new(case, &state, p1_atm)?;
        let initial = expansion.polytropic(&state.heat_capacities())?;

        let mut roots_converged = true;
        let outcome = iterate_coefficients(
            initial,
            |poly: &Polytropic| -> ChokeResult<f64> {
                let root = solve_scalar(
                    RATIO_SEED,
                    |pr| -> ChokeResult<f64> { Ok(expansion.throat_residual(poly, pr)) },
                    &self.ratio_solver,
                )?;
                roots_converged &= root.converged;
                Ok(root.x)
            },
            |pr| -> ChokeResult<Polytropic> {
                let p_mid = 0.5 * p1_atm * (1.0 + pr);
                let caps = HeatCapacities::at(model, case, field::pressure(p_mid))?;
                expansion.polytropic(&caps)
            },
            &self.fixed_point,
        )?;

        let rc = outcome.value;
        let (pr, choked) = match p2_atm {
            Some(p2) => {
                let ratio = p2 / p1_atm;
                (rc.max(ratio).min(1.0), rc >= ratio)
            }
            None => (rc.min(1.0), true),
        };
        let w = expansion.mass_rate_kghr(&outcome.coefficients, pr);
        check_finite(w, "mass flow rate")?;

        let converged = outcome.converged && roots_converged;
        debug!(
            mixture = case.mixture.label(),
            p1_atm,
            throat_ratio = rc,
            iterations = outcome.iterations,
            converged,
            "perkins throat ratio"
        );

        Ok(FlowEstimate {
            mass_rate: kgph(w),
            pressure_ratio: pr,
            critical_ratio: Some(rc),
            choked,
            converged,
            iterations: outcome.iterations,
        })
    }
}

impl ChokeCorrelation for Perkins {
    fn name(&self) -> &str {
        "Perkins"
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

#[cfg(test)]
mod tests {
    use super::*;
    use cf_fluids::StandardFluidModel;

    #[test]
    fn steam_critical_reference_case() {
        let model = StandardFluidModel::default();
        let case = ChokeCase::new(Mixture::steam(1.0));
        let perkins = Perkins::default();

        let critical = perkins.critical_flow(&model, &case, 20.0).unwrap().unwrap();
        assert!((critical.kg_per_hour() - 282.0).abs() < 10.0, "w = {}", critical.kg_per_hour());
        assert!(critical.converged);
        assert!(critical.iterations >= 1);

        let forward = perkins.flow(&model, &case, 20.0, 1.0).unwrap();
        assert!(forward.choked);
        assert!((forward.kg_per_hour() - critical.kg_per_hour()).abs() < 1e-9);
    }

    #[test]
    fn throat_ratio_solves_the_balance() {
        let model = StandardFluidModel::default();
        let case = ChokeCase::new(Mixture::gas_water(0.7));
        let state = FluidState::evaluate(&model, &case, field::pressure(50.0)).unwrap();
        let expansion = Expansion::new(&case, &state, 50.0).unwrap();
        let poly = expansion.polytropic(&state.heat_capacities()).unwrap();

        let root = solve_scalar(
            RATIO_SEED,
            |pr| -> ChokeResult<f64> { Ok(expansion.throat_residual(&poly, pr)) },
            &Perkins::default().ratio_solver,
        )
        .unwrap();
        assert!(root.converged);
        assert!(root.x > 0.0 && root.x < 1.0);
    }

    #[test]
    fn api_heat_capacity_increases_with_temperature() {
        let cold = api_oil_heat_capacity(35.0, 68.0);
        let hot = api_oil_heat_capacity(35.0, 200.0);
        assert!(hot > cold);
        assert!((cold - 778.0 * (0.355 + 0.0616 + (0.0051 + 4.0845e-4) * 68.0)).abs() < 1e-9);
    }

    #[test]
    fn three_phase_uses_api_oil_heat_capacity() {
        let model = StandardFluidModel::default();
        let case = ChokeCase::new(Mixture::gas_oil_water(0.4, 0.3, 0.3));
        let state = FluidState::evaluate(&model, &case, field::pressure(30.0)).unwrap();
        let expansion = Expansion::new(&case, &state, 30.0).unwrap();
        let cv = expansion.api_oil_cv.unwrap();
        assert!((cv - 284.75).abs() < 0.05, "cv = {cv}");

        let two_phase = ChokeCase::new(Mixture::gas_oil(0.4));
        let state = FluidState::evaluate(&model, &two_phase, field::pressure(30.0)).unwrap();
        let expansion = Expansion::new(&two_phase, &state, 30.0).unwrap();
        assert!(expansion.api_oil_cv.is_none());
    }

    #[test]
    fn fitted_api_gravity_keeps_operator_order() {
        assert!((fitted_api_gravity(800.0) - (0.176_875e-3 - 131.5)).abs() < 1e-12);
    }

    #[test]
    fn three_phase_reference_case() {
        let model = StandardFluidModel::default();
        let case = ChokeCase::new(Mixture::gas_oil_water(0.4, 0.3, 0.3));
        let perkins = Perkins::default();

        let est = perkins.flow(&model, &case, 30.0, 20.0).unwrap();
        assert!(est.converged);
        assert!((est.kg_per_hour() - 548.9).abs() < 0.5, "w = {}", est.kg_per_hour());
        let rc = est.critical_ratio.unwrap();
        assert!((rc - 0.581).abs() < 2e-3, "rc = {rc}");
    }

    #[test]
    fn zero_iteration_cap_reports_unconverged() {
        let model = StandardFluidModel::default();
        let case = ChokeCase::new(Mixture::gas_oil(0.5));
        let perkins = Perkins {
            fixed_point: FixedPointConfig {
                max_iterations: 0,
                tolerance: 1e-3,
            },
            ..Perkins::default()
        };
        let est = perkins.flow(&model, &case, 40.0, 30.0).unwrap();
        assert!(!est.converged);
        assert_eq!(est.iterations, 0);
        assert!(est.kg_per_hour() > 0.0);
    }
}
