//! Fluid state at the choke inlet, evaluated fresh for every call.
//!
//! The provider is asked only for the phases the mixture contains. Oil and
//! water are kept separately and also blended into a single pseudo-liquid by
//! mass weighting, which is what the two-phase correlations consume.

use crate::error::ChokeResult;
use crate::mixture::{ChokeCase, Mixture};
use cf_core::floor_fraction;
use cf_core::units::{Density, Pressure};
use cf_fluids::{FluidModel, SpecHeatCapacity};

/// Blend weight given to an absent oil or water share of a three-phase mix
pub const BLEND_WEIGHT_FLOOR: f64 = 1e-5;

/// Gas or vapour phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasPhase {
    pub density: Density,
    pub cv: SpecHeatCapacity,
    pub cp: SpecHeatCapacity,
    /// Compressibility factor; `None` for steam
    pub z: Option<f64>,
}

impl GasPhase {
    pub fn specific_volume(&self) -> f64 {
        1.0 / self.density.value
    }
}

/// One liquid component (oil or water).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidPhase {
    pub density: Density,
    pub cv: SpecHeatCapacity,
}

impl LiquidPhase {
    pub fn specific_volume(&self) -> f64 {
        1.0 / self.density.value
    }
}

/// Heat capacities that the Perkins iteration re-evaluates away from p1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatCapacities {
    pub gas_cv: SpecHeatCapacity,
    pub gas_cp: SpecHeatCapacity,
    pub oil_cv: Option<SpecHeatCapacity>,
    pub water_cv: Option<SpecHeatCapacity>,
}

impl HeatCapacities {
    /// Query the provider for the heat capacities of `case` at pressure `p`.
    pub fn at(model: &dyn FluidModel, case: &ChokeCase, p: Pressure) -> ChokeResult<Self> {
        let (gas_cv, gas_cp) = if case.mixture.is_steam() {
            let vapour = model.saturated_vapour(p)?;
            (vapour.cv, vapour.cp)
        } else {
            let gas = model.gas(p, &case.pvt)?;
            (gas.cv, gas.cp)
        };
        let oil_cv = if case.mixture.has_oil() {
            Some(model.oil(p, &case.pvt)?.cv)
        } else {
            None
        };
        let water_cv = if case.mixture.has_water() {
            Some(model.saturated_liquid(p)?.cv)
        } else {
            None
        };
        Ok(Self {
            gas_cv,
            gas_cp,
            oil_cv,
            water_cv,
        })
    }
}

/// Phase properties at one pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidState {
    pub gas: GasPhase,
    pub oil: Option<LiquidPhase>,
    pub water: Option<LiquidPhase>,
    oil_weight: f64,
    water_weight: f64,
}

impl FluidState {
    pub fn evaluate(model: &dyn FluidModel, case: &ChokeCase, p: Pressure) -> ChokeResult<Self> {
        let mixture = &case.mixture;

        let gas = if mixture.is_steam() {
            let vapour = model.saturated_vapour(p)?;
            GasPhase {
                density: vapour.density,
                cv: vapour.cv,
                cp: vapour.cp,
                z: None,
            }
        } else {
            let gas = model.gas(p, &case.pvt)?;
            GasPhase {
                density: gas.density,
                cv: gas.cv,
                cp: gas.cp,
                z: Some(gas.z),
            }
        };

        let oil = if mixture.has_oil() {
            let oil = model.oil(p, &case.pvt)?;
            Some(LiquidPhase {
                density: oil.density,
                cv: oil.cv,
            })
        } else {
            None
        };

        let water = if mixture.has_water() {
            let liquid = model.saturated_liquid(p)?;
            Some(LiquidPhase {
                density: liquid.density,
                cv: liquid.cv,
            })
        } else {
            None
        };

        let (oil_weight, water_weight) = match *mixture {
            Mixture::GasOilWater { .. } => {
                let f = mixture.fractions()?;
                (
                    floor_fraction(f.oil, BLEND_WEIGHT_FLOOR),
                    floor_fraction(f.water, BLEND_WEIGHT_FLOOR),
                )
            }
            Mixture::GasOil { .. } => (1.0, 0.0),
            Mixture::GasWater { .. } | Mixture::Steam { .. } => (0.0, 1.0),
        };

        Ok(Self {
            gas,
            oil,
            water,
            oil_weight,
            water_weight,
        })
    }

    pub fn heat_capacities(&self) -> HeatCapacities {
        HeatCapacities {
            gas_cv: self.gas.cv,
            gas_cp: self.gas.cp,
            oil_cv: self.oil.map(|o| o.cv),
            water_cv: self.water.map(|w| w.cv),
        }
    }

    /// Mass-weighted blend of a liquid property over the present components.
    fn blend(&self, f: impl Fn(&LiquidPhase) -> f64) -> f64 {
        let mut sum = 0.0;
        let mut weight = 0.0;
        if let Some(oil) = &self.oil {
            sum += self.oil_weight * f(oil);
            weight += self.oil_weight;
        }
        if let Some(water) = &self.water {
            sum += self.water_weight * f(water);
            weight += self.water_weight;
        }
        sum / weight
    }

    /// Pseudo-liquid specific volume [m³/kg]
    pub fn liquid_specific_volume(&self) -> f64 {
        self.blend(LiquidPhase::specific_volume)
    }

    /// Pseudo-liquid isochoric heat capacity [J/(kg·K)]
    pub fn liquid_cv(&self) -> SpecHeatCapacity {
        self.blend(|l| l.cv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::units::atm;
    use cf_fluids::StandardFluidModel;

    #[test]
    fn gas_water_state_uses_saturated_water() {
        let model = StandardFluidModel::default();
        let case = ChokeCase::new(Mixture::gas_water(0.5));
        let state = FluidState::evaluate(&model, &case, atm(20.0)).unwrap();

        assert!(state.oil.is_none());
        let water = state.water.unwrap();
        assert!((state.liquid_specific_volume() - water.specific_volume()).abs() < 1e-15);
        assert!(state.gas.z.is_some());
    }

    #[test]
    fn steam_state_has_no_z() {
        let model = StandardFluidModel::default();
        let case = ChokeCase::new(Mixture::steam(1.0));
        let state = FluidState::evaluate(&model, &case, atm(20.0)).unwrap();
        assert!(state.gas.z.is_none());
        assert!(state.gas.specific_volume() > 0.09 && state.gas.specific_volume() < 0.11);
    }

    #[test]
    fn three_phase_blend_lies_between_components() {
        let model = StandardFluidModel::default();
        let case = ChokeCase::new(Mixture::gas_oil_water(0.5, 0.3, 0.2));
        let state = FluidState::evaluate(&model, &case, atm(50.0)).unwrap();

        let vo = state.oil.unwrap().specific_volume();
        let vw = state.water.unwrap().specific_volume();
        let vl = state.liquid_specific_volume();
        assert!(vl > vo.min(vw) && vl < vo.max(vw));

        let expected = (0.3 * vo + 0.2 * vw) / 0.5;
        assert!((vl - expected).abs() < 1e-15);
    }

    #[test]
    fn heat_capacities_at_query_matches_state() {
        let model = StandardFluidModel::default();
        let case = ChokeCase::new(Mixture::gas_oil(0.5));
        let state = FluidState::evaluate(&model, &case, atm(30.0)).unwrap();
        let caps = HeatCapacities::at(&model, &case, atm(30.0)).unwrap();
        assert_eq!(caps, state.heat_capacities());
    }
}
