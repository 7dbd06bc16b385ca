//! Black-oil hydrocarbon PVT.
//!
//! Gas: Sutton pseudo-critical properties, Dranchuk–Abou-Kassem Z factor and
//! the real-gas law. Oil: Standing solution gas-oil ratio scaled to the
//! bubble-point calibration, with an exponential shrinkage above the bubble
//! point. Heat capacities are constant model configuration.

use crate::error::{FluidError, FluidResult};
use crate::model::{GasProperties, OilProperties, SpecHeatCapacity, validation};
use crate::pvt::PvtParams;
use cf_core::units::constants::{M_AIR_KG_PER_MOL, R_J_PER_MOL_K, degc_to_degf};
use cf_core::units::{Pressure, kgm3, to_mpa};

const PSI_PER_MPA: f64 = 145.0377;

/// Mass of dissolved gas per unit gas gravity and m³ of solution gas [kg/m³]
const STD_AIR_DENSITY: f64 = 1.2217;

const DAK: [f64; 11] = [
    0.3265, -1.0700, -0.5339, 0.01569, -0.05165, 0.5475, -0.7361, 0.1844, 0.1056, 0.6134, 0.7210,
];

/// Black-oil model configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlackOilConfig {
    /// Gas isobaric heat capacity [J/(kg·K)]
    pub gas_cp: SpecHeatCapacity,
    /// Gas isochoric heat capacity [J/(kg·K)]
    pub gas_cv: SpecHeatCapacity,
    /// Oil isochoric heat capacity [J/(kg·K)]
    pub oil_cv: SpecHeatCapacity,
    /// Maximum Newton iterations for the Z factor
    pub z_max_iterations: usize,
    /// Convergence tolerance on reduced density
    pub z_tolerance: f64,
}

impl Default for BlackOilConfig {
    fn default() -> Self {
        Self {
            gas_cp: 2220.0,
            gas_cv: 1700.0,
            oil_cv: 2000.0,
            z_max_iterations: 100,
            z_tolerance: 1e-12,
        }
    }
}

/// Hydrocarbon gas and oil property correlations.
#[derive(Clone, Debug, Default)]
pub struct BlackOilModel {
    pub config: BlackOilConfig,
}

impl BlackOilModel {
    pub fn new(config: BlackOilConfig) -> Self {
        Self { config }
    }

    /// Sutton pseudo-critical temperature [°R] and pressure [psia].
    pub fn pseudo_critical(gas_gravity: f64) -> (f64, f64) {
        let g = gas_gravity;
        let tpc = 169.2 + 349.5 * g - 74.0 * g * g;
        let ppc = 756.8 - 131.0 * g - 3.6 * g * g;
        (tpc, ppc)
    }

    pub fn gas(&self, p: Pressure, pvt: &PvtParams) -> FluidResult<GasProperties> {
        validation::validate_pressure(p)?;
        pvt.validate()?;

        let t = pvt.temperature();
        let (tpc, ppc) = Self::pseudo_critical(pvt.gas_gravity);
        let ppr = to_mpa(p) * PSI_PER_MPA / ppc;
        let tpr = (t.value * 1.8) / tpc;
        let z = z_factor_dak(ppr, tpr, &self.config)?;

        let rho = p.value * M_AIR_KG_PER_MOL * pvt.gas_gravity / (z * R_J_PER_MOL_K * t.value);
        let density = kgm3(rho);
        validation::validate_density(density)?;

        Ok(GasProperties {
            density,
            z,
            cv: self.config.gas_cv,
            cp: self.config.gas_cp,
        })
    }

    pub fn oil(&self, p: Pressure, pvt: &PvtParams) -> FluidResult<OilProperties> {
        validation::validate_pressure(p)?;
        pvt.validate()?;

        let p_mpa = to_mpa(p);
        let pb = pvt.bubble_point_mpa;
        let (rs, bo) = if p_mpa < pb {
            // Standing's shape, pinned to the calibration at the bubble point
            let ratio = standing_rs(p_mpa, pvt) / standing_rs(pb, pvt);
            let rs = pvt.solution_gor_m3m3 * ratio;
            let bo = 1.0 + (pvt.formation_volume_factor - 1.0) * ratio;
            (rs, bo)
        } else {
            let shrink = (pvt.oil_compressibility_1_mpa * (pb - p_mpa)).exp();
            let bo = pvt.formation_volume_factor * shrink;
            (pvt.solution_gor_m3m3, bo)
        };

        if !bo.is_finite() || bo <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "oil formation volume factor",
            });
        }

        let dissolved = STD_AIR_DENSITY * pvt.gas_gravity * rs;
        let density = kgm3((1000.0 * pvt.oil_gravity + dissolved) / bo);
        validation::validate_density(density)?;
        validation::validate_heat_capacity(self.config.oil_cv)?;

        Ok(OilProperties {
            density,
            cv: self.config.oil_cv,
            solution_gas_ratio: rs,
            formation_volume_factor: bo,
        })
    }
}

/// Standing solution gas-oil ratio [scf/stb]; only its shape in pressure is used.
fn standing_rs(p_mpa: f64, pvt: &PvtParams) -> f64 {
    let t_f = degc_to_degf(pvt.temperature_c);
    let exponent = 0.0125 * pvt.api_gravity() - 0.00091 * t_f;
    pvt.gas_gravity * ((p_mpa * PSI_PER_MPA / 18.2 + 1.4) * 10f64.powf(exponent)).powf(1.2048)
}

/// Dranchuk–Abou-Kassem compressibility factor.
///
/// Solves the eleven-constant equation of state for reduced density by Newton
/// iteration, seeded from the ideal-gas value.
pub fn z_factor_dak(ppr: f64, tpr: f64, config: &BlackOilConfig) -> FluidResult<f64> {
    if !ppr.is_finite() || ppr <= 0.0 || !tpr.is_finite() || tpr <= 0.0 {
        return Err(FluidError::OutOfRange {
            what: "pseudo-reduced pressure and temperature",
        });
    }

    let a = &DAK;
    let c1 = a[0] + a[1] / tpr + a[2] / tpr.powi(3) + a[3] / tpr.powi(4) + a[4] / tpr.powi(5);
    let c2 = a[5] + a[6] / tpr + a[7] / (tpr * tpr);
    let c3 = a[8] * (a[6] / tpr + a[7] / (tpr * tpr));
    let c4 = a[9] / tpr.powi(3);
    let k = 0.27 * ppr / tpr;

    let residual = |rho: f64| {
        let r2 = rho * rho;
        let e = (-a[10] * r2).exp();
        let z = 1.0 + c1 * rho + c2 * r2 - c3 * rho.powi(5) + c4 * (1.0 + a[10] * r2) * r2 * e;
        let dz = c1 + 2.0 * c2 * rho - 5.0 * c3 * rho.powi(4)
            + 2.0 * c4 * rho * (1.0 + a[10] * r2 - a[10] * a[10] * r2 * r2) * e;
        (z - k / rho, dz + k / r2)
    };

    let mut rho = k;
    for _ in 0..config.z_max_iterations {
        let (f, df) = residual(rho);
        if !f.is_finite() || !df.is_finite() || df == 0.0 {
            break;
        }
        let mut next = rho - f / df;
        if next <= 0.0 {
            next = 0.5 * rho;
        }
        if (next - rho).abs() <= config.z_tolerance * rho.max(1.0) {
            let z = k / next;
            return if z.is_finite() && z > 0.0 {
                Ok(z)
            } else {
                Err(FluidError::NonPhysical { what: "Z factor" })
            };
        }
        rho = next;
    }

    Err(FluidError::ConvergenceFailed { what: "Z factor" })
}
