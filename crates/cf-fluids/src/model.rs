//! Fluid property model trait and validation helpers.

use crate::error::{FluidError, FluidResult};
use crate::pvt::PvtParams;
use cf_core::units::{Density, Pressure};

/// Specific heat capacity [J/(kg·K)]
pub type SpecHeatCapacity = f64;

/// Properties of a single saturated phase (liquid water or steam).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseProperties {
    /// Density [kg/m³]
    pub density: Density,
    /// Isochoric heat capacity [J/(kg·K)]
    pub cv: SpecHeatCapacity,
    /// Isobaric heat capacity [J/(kg·K)]
    pub cp: SpecHeatCapacity,
}

impl PhaseProperties {
    /// Specific volume [m³/kg]
    pub fn specific_volume(&self) -> f64 {
        1.0 / self.density.value
    }
}

/// Free-gas properties at flowing conditions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GasProperties {
    pub density: Density,
    /// Compressibility factor
    pub z: f64,
    pub cv: SpecHeatCapacity,
    pub cp: SpecHeatCapacity,
}

impl GasProperties {
    pub fn specific_volume(&self) -> f64 {
        1.0 / self.density.value
    }
}

/// Live-oil properties at flowing conditions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OilProperties {
    pub density: Density,
    pub cv: SpecHeatCapacity,
    /// Dissolved gas [m³/m³]
    pub solution_gas_ratio: f64,
    /// Formation volume factor [m³/m³]
    pub formation_volume_factor: f64,
}

impl OilProperties {
    pub fn specific_volume(&self) -> f64 {
        1.0 / self.density.value
    }
}

/// Trait for fluid property providers.
///
/// The choke correlations treat the provider as a pure oracle: every call is
/// independent and nothing is cached, so implementations must be thread-safe
/// (Send + Sync) and free of interior state. All returned values are
/// validated positive and finite.
pub trait FluidModel: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Free gas at pressure `p` and the PVT temperature.
    fn gas(&self, p: Pressure, pvt: &PvtParams) -> FluidResult<GasProperties>;

    /// Live oil at pressure `p` and the PVT temperature.
    fn oil(&self, p: Pressure, pvt: &PvtParams) -> FluidResult<OilProperties>;

    /// Saturated liquid water at pressure `p`.
    fn saturated_liquid(&self, p: Pressure) -> FluidResult<PhaseProperties>;

    /// Saturated steam at pressure `p`.
    fn saturated_vapour(&self, p: Pressure) -> FluidResult<PhaseProperties>;
}

/// Validation helpers for fluid properties.
pub(crate) mod validation {
    use super::*;

    /// Ensure pressure is positive and finite.
    pub fn validate_pressure(p: Pressure) -> FluidResult<()> {
        if !p.value.is_finite() || p.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure density is positive and finite.
    pub fn validate_density(rho: Density) -> FluidResult<()> {
        if !rho.value.is_finite() || rho.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "density must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure specific heat capacity is positive and finite.
    pub fn validate_heat_capacity(c: SpecHeatCapacity) -> FluidResult<()> {
        if !c.is_finite() || c <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "heat capacity must be positive and finite",
            });
        }
        Ok(())
    }

    pub fn validate_phase(props: &PhaseProperties) -> FluidResult<()> {
        validate_density(props.density)?;
        validate_heat_capacity(props.cv)?;
        validate_heat_capacity(props.cp)
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;
    use cf_core::units::{kgm3, pa};

    #[test]
    fn validate_positive_pressure() {
        assert!(validate_pressure(pa(101325.0)).is_ok());
        assert!(validate_pressure(pa(-100.0)).is_err());
        assert!(validate_pressure(pa(0.0)).is_err());
        assert!(validate_pressure(pa(f64::NAN)).is_err());
    }

    #[test]
    fn validate_density_positive() {
        assert!(validate_density(kgm3(1000.0)).is_ok());
        assert!(validate_density(kgm3(-1.0)).is_err());
        assert!(validate_density(kgm3(0.0)).is_err());
    }

    #[test]
    fn validate_phase_checks_every_field() {
        let ok = PhaseProperties {
            density: kgm3(850.0),
            cv: 3269.0,
            cp: 4400.0,
        };
        assert!(validate_phase(&ok).is_ok());

        let bad = PhaseProperties { cv: f64::NAN, ..ok };
        assert!(validate_phase(&bad).is_err());
    }

    #[test]
    fn specific_volume_is_reciprocal() {
        let gas = GasProperties {
            density: kgm3(13.76),
            z: 0.963,
            cv: 1700.0,
            cp: 2220.0,
        };
        assert!((gas.specific_volume() * 13.76 - 1.0).abs() < 1e-12);
    }
}
