//! Chien/Miller homogeneous orifice correlation.
//!
//! The two phases are lumped into one mixture density and pushed through a
//! square-root orifice equation. There is no choking model: flow keeps rising
//! with the pressure drop.

use crate::common::{check_finite, validate_pressures};
use crate::correlation::{ChokeCorrelation, FlowEstimate};
use crate::error::{ChokeError, ChokeResult};
use crate::mixture::{ChokeCase, ChokeGeometry};
use crate::state::FluidState;
use cf_core::units::field::{self, KPA_PER_ATM};
use cf_fluids::FluidModel;

/// Orifice constant for kg/s with d in mm, Δp in kPa and ρ in kg/m³
const ORIFICE_CONSTANT: f64 = 3.512407e-5;

/// Square of `ORIFICE_CONSTANT` as used by the closed-form inverse
const ORIFICE_CONSTANT_SQ: f64 = 12.337e-10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chien {
    /// Discharge coefficient C0
    pub discharge_coefficient: f64,
    /// Gas expansion factor Y1
    pub expansion_factor: f64,
    /// Coefficient on the gas specific volume
    pub gas_volume_coefficient: f64,
    /// Exponent on the gas mass fraction
    pub quality_exponent: f64,
}

impl Default for Chien {
    fn default() -> Self {
        Self {
            discharge_coefficient: 0.8,
            expansion_factor: 0.89487,
            gas_volume_coefficient: 0.99998,
            quality_exponent: 1.38,
        }
    }
}

impl Chien {
    /// Homogeneous mixture density [kg/m³] at p1.
    pub fn mixture_density(
        &self,
        model: &dyn FluidModel,
        case: &ChokeCase,
        p1_atm: f64,
    ) -> ChokeResult<f64> {
        case.validate()?;
        let x = case.mixture.gas_fraction()?;
        let state = FluidState::evaluate(model, case, field::pressure(p1_atm))?;

        let v_mix = self.gas_volume_coefficient
            * state.gas.specific_volume()
            * x.powf(self.quality_exponent)
            + state.liquid_specific_volume();
        let rho = 1.0 / v_mix;
        check_finite(rho, "mixture density")?;
        Ok(rho)
    }

    /// C0·Y1·d0²/sqrt(1 − β⁴)
    fn orifice_factor(&self, geometry: &ChokeGeometry) -> f64 {
        let d0 = geometry.choke_diameter_mm;
        let beta = geometry.beta();
        self.discharge_coefficient * self.expansion_factor * d0 * d0 / (1.0 - beta.powi(4)).sqrt()
    }
}

impl ChokeCorrelation for Chien {
    fn name(&self) -> &str {
        "Chien"
    }

    fn flow(
        &self,
        model: &dyn FluidModel,
        case: &ChokeCase,
        p1_atm: f64,
        p2_atm: f64,
    ) -> ChokeResult<FlowEstimate> {
        validate_pressures(p1_atm, p2_atm)?;
        let ratio = (p2_atm / p1_atm).min(1.0);
        let dp = p1_atm - p2_atm;
        if dp <= 0.0 {
            return Ok(FlowEstimate::closed_form(0.0, ratio));
        }

        let rho = self.mixture_density(model, case, p1_atm)?;
        let w_kgs =
            ORIFICE_CONSTANT * self.orifice_factor(&case.geometry) * (KPA_PER_ATM * dp * rho).sqrt();
        check_finite(w_kgs, "mass flow rate")?;

        Ok(FlowEstimate::closed_form(w_kgs * 3600.0, ratio))
    }

    fn downstream_pressure(
        &self,
        model: &dyn FluidModel,
        case: &ChokeCase,
        p1_atm: f64,
        w_kghr: f64,
    ) -> ChokeResult<Option<f64>> {
        validate_pressures(p1_atm, 0.0)?;
        if !w_kghr.is_finite() || w_kghr < 0.0 {
            return Err(ChokeError::InvalidArg {
                what: "mass rate must be non-negative",
            });
        }

        let rho = self.mixture_density(model, case, p1_atm)?;
        let w_kgs = w_kghr / 3600.0;
        let factor = self.orifice_factor(&case.geometry);
        let dp_kpa = w_kgs * w_kgs / (ORIFICE_CONSTANT_SQ * factor * factor * rho);
        let p2 = p1_atm - dp_kpa / KPA_PER_ATM;
        check_finite(p2, "downstream pressure")?;
        Ok(Some(p2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixture::Mixture;
    use cf_fluids::StandardFluidModel;

    #[test]
    fn zero_flow_without_pressure_drop() {
        let model = StandardFluidModel::default();
        let case = ChokeCase::new(Mixture::gas_water(1.0));
        let chien = Chien::default();

        let est = chien.flow(&model, &case, 20.0, 20.0).unwrap();
        assert_eq!(est.kg_per_hour(), 0.0);

        let est = chien.flow(&model, &case, 20.0, 25.0).unwrap();
        assert_eq!(est.kg_per_hour(), 0.0);
        assert_eq!(est.pressure_ratio, 1.0);
    }

    #[test]
    fn gas_water_reference_case() {
        let model = StandardFluidModel::default();
        let case = ChokeCase::new(Mixture::gas_water(1.0));
        let est = Chien::default().flow(&model, &case, 20.0, 10.0).unwrap();
        assert!((est.kg_per_hour() - 263.0).abs() < 10.0, "w = {}", est.kg_per_hour());
        assert!(!est.choked);
    }

    #[test]
    fn closed_form_inverse_matches_forward() {
        let model = StandardFluidModel::default();
        let case = ChokeCase::new(Mixture::gas_oil(0.5));
        let chien = Chien::default();

        let w = chien.flow(&model, &case, 60.0, 45.0).unwrap().kg_per_hour();
        let p2 = chien.downstream_pressure(&model, &case, 60.0, w).unwrap().unwrap();
        assert!((p2 - 45.0).abs() < 1e-3, "p2 = {p2}");
    }

    #[test]
    fn liquid_only_uses_liquid_density() {
        let model = StandardFluidModel::default();
        let case = ChokeCase::new(Mixture::gas_water(0.0));
        let rho = Chien::default().mixture_density(&model, &case, 20.0).unwrap();
        assert!(rho > 800.0 && rho < 900.0, "rho = {rho}");
    }

    #[test]
    fn properties_are_looked_up_on_the_bar_basis() {
        use cf_core::units::mpa;

        let model = StandardFluidModel::default();
        let case = ChokeCase::new(Mixture::steam(1.0));
        let chien = Chien::default();
        let rho = chien.mixture_density(&model, &case, 10.0).unwrap();

        let vv = model.saturated_vapour(mpa(1.0)).unwrap().specific_volume();
        let vl = model.saturated_liquid(mpa(1.0)).unwrap().specific_volume();
        let expected = 1.0 / (chien.gas_volume_coefficient * vv + vl);
        assert!((rho - expected).abs() < 1e-9 * expected, "{rho} vs {expected}");
    }

    #[test]
    fn negative_rate_rejected() {
        let model = StandardFluidModel::default();
        let case = ChokeCase::new(Mixture::gas_water(0.5));
        let err = Chien::default()
            .downstream_pressure(&model, &case, 20.0, -1.0)
            .unwrap_err();
        assert!(matches!(err, ChokeError::InvalidArg { .. }));
    }
}
