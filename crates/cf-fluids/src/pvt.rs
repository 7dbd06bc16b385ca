//! Black-oil PVT parameters describing a hydrocarbon system.

use crate::error::{FluidError, FluidResult};
use cf_core::units::{Pressure, Temperature, degc, mpa};

/// Hydrocarbon fluid description shared by the gas and oil correlations.
///
/// Field names carry their units. Defaults describe a light gas over a
/// medium oil at 20 °C.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PvtParams {
    /// Gas specific gravity relative to air
    pub gas_gravity: f64,
    /// Oil specific gravity relative to water
    pub oil_gravity: f64,
    /// Flowing temperature [°C]
    pub temperature_c: f64,
    /// Bubble point pressure [MPa]
    pub bubble_point_mpa: f64,
    /// Solution gas-oil ratio at the bubble point [m³/m³]
    pub solution_gor_m3m3: f64,
    /// Oil formation volume factor at the bubble point [m³/m³]
    pub formation_volume_factor: f64,
    /// Undersaturated oil compressibility [1/MPa]
    pub oil_compressibility_1_mpa: f64,
}

impl Default for PvtParams {
    fn default() -> Self {
        Self {
            gas_gravity: 0.55,
            oil_gravity: 0.8,
            temperature_c: 20.0,
            bubble_point_mpa: 20.0,
            solution_gor_m3m3: 300.0,
            formation_volume_factor: 1.0,
            oil_compressibility_1_mpa: 0.002,
        }
    }
}

impl PvtParams {
    pub fn with_temperature_c(mut self, t_c: f64) -> Self {
        self.temperature_c = t_c;
        self
    }

    pub fn with_gas_gravity(mut self, gamma: f64) -> Self {
        self.gas_gravity = gamma;
        self
    }

    pub fn with_oil_gravity(mut self, gamma: f64) -> Self {
        self.oil_gravity = gamma;
        self
    }

    pub fn temperature(&self) -> Temperature {
        degc(self.temperature_c)
    }

    pub fn bubble_point(&self) -> Pressure {
        mpa(self.bubble_point_mpa)
    }

    /// Stock-tank oil API gravity.
    pub fn api_gravity(&self) -> f64 {
        141.5 / self.oil_gravity - 131.5
    }

    /// Reject parameter sets the correlations cannot evaluate.
    pub fn validate(&self) -> FluidResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.gas_gravity) {
            return Err(FluidError::InvalidArg {
                what: "gas gravity must be positive",
            });
        }
        if !positive(self.oil_gravity) {
            return Err(FluidError::InvalidArg {
                what: "oil gravity must be positive",
            });
        }
        if !self.temperature_c.is_finite() || self.temperature().value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be above absolute zero",
            });
        }
        if !positive(self.bubble_point_mpa) {
            return Err(FluidError::InvalidArg {
                what: "bubble point must be positive",
            });
        }
        if !self.solution_gor_m3m3.is_finite() || self.solution_gor_m3m3 < 0.0 {
            return Err(FluidError::InvalidArg {
                what: "solution gas-oil ratio must be non-negative",
            });
        }
        if !positive(self.formation_volume_factor) {
            return Err(FluidError::InvalidArg {
                what: "formation volume factor must be positive",
            });
        }
        if !self.oil_compressibility_1_mpa.is_finite() {
            return Err(FluidError::InvalidArg {
                what: "oil compressibility must be finite",
            });
        }
        Ok(())
    }
}
