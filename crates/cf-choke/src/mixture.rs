//! Fluid combinations, choke geometry and the per-call flow case.

use crate::common::clamp_fraction;
use crate::error::{ChokeError, ChokeResult};
use cf_core::units::{Length, to_mm};
use cf_fluids::PvtParams;

/// The four fluid combinations a choke correlation can be asked about.
///
/// Fractions are mass fractions of the total flow. Out-of-range values are
/// clamped into [0, 1] when read; each correlation then applies its own
/// floor to avoid dividing by a vanishing phase.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mixture {
    /// Natural gas with produced water
    GasWater { gas_fraction: f64 },
    /// Natural gas with live oil
    GasOil { gas_fraction: f64 },
    /// Natural gas, live oil and water. The three fractions are used as given.
    GasOilWater {
        gas_fraction: f64,
        oil_fraction: f64,
        water_fraction: f64,
    },
    /// Saturated steam/water, `quality` being the vapour mass fraction
    Steam { quality: f64 },
}

/// Mass fractions per phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseFractions {
    pub gas: f64,
    pub oil: f64,
    pub water: f64,
}

impl Mixture {
    pub fn gas_water(gas_fraction: f64) -> Self {
        Self::GasWater { gas_fraction }
    }

    pub fn gas_oil(gas_fraction: f64) -> Self {
        Self::GasOil { gas_fraction }
    }

    pub fn gas_oil_water(gas_fraction: f64, oil_fraction: f64, water_fraction: f64) -> Self {
        Self::GasOilWater {
            gas_fraction,
            oil_fraction,
            water_fraction,
        }
    }

    pub fn steam(quality: f64) -> Self {
        Self::Steam { quality }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::GasWater { .. } => "gas/water",
            Self::GasOil { .. } => "gas/oil",
            Self::GasOilWater { .. } => "gas/oil/water",
            Self::Steam { .. } => "steam",
        }
    }

    /// Whether the gas phase is steam rather than a hydrocarbon gas.
    pub fn is_steam(&self) -> bool {
        matches!(self, Self::Steam { .. })
    }

    pub fn has_oil(&self) -> bool {
        matches!(self, Self::GasOil { .. } | Self::GasOilWater { .. })
    }

    pub fn has_water(&self) -> bool {
        !matches!(self, Self::GasOil { .. })
    }

    /// Gas (or vapour) mass fraction, clamped into [0, 1].
    pub fn gas_fraction(&self) -> ChokeResult<f64> {
        let x = match *self {
            Self::GasWater { gas_fraction }
            | Self::GasOil { gas_fraction }
            | Self::GasOilWater { gas_fraction, .. } => gas_fraction,
            Self::Steam { quality } => quality,
        };
        clamp_fraction(x, "gas mass fraction must be finite")
    }

    /// Per-phase mass fractions. Two-phase combinations put the complement
    /// of the gas fraction into their single liquid.
    pub fn fractions(&self) -> ChokeResult<PhaseFractions> {
        let gas = self.gas_fraction()?;
        Ok(match *self {
            Self::GasWater { .. } | Self::Steam { .. } => PhaseFractions {
                gas,
                oil: 0.0,
                water: 1.0 - gas,
            },
            Self::GasOil { .. } => PhaseFractions {
                gas,
                oil: 1.0 - gas,
                water: 0.0,
            },
            Self::GasOilWater {
                oil_fraction,
                water_fraction,
                ..
            } => PhaseFractions {
                gas,
                oil: clamp_fraction(oil_fraction, "oil mass fraction must be finite")?,
                water: clamp_fraction(water_fraction, "water mass fraction must be finite")?,
            },
        })
    }
}

/// Choke bore and the pipe it sits in.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChokeGeometry {
    /// Choke (bean) diameter [mm]
    pub choke_diameter_mm: f64,
    /// Upstream pipe diameter [mm]
    pub pipe_diameter_mm: f64,
}

impl Default for ChokeGeometry {
    fn default() -> Self {
        Self {
            choke_diameter_mm: 5.0,
            pipe_diameter_mm: 100.0,
        }
    }
}

impl ChokeGeometry {
    pub fn new(choke_diameter_mm: f64, pipe_diameter_mm: f64) -> ChokeResult<Self> {
        let geometry = Self {
            choke_diameter_mm,
            pipe_diameter_mm,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Geometry from bores given as lengths in any unit.
    pub fn from_lengths(choke_diameter: Length, pipe_diameter: Length) -> ChokeResult<Self> {
        Self::new(to_mm(choke_diameter), to_mm(pipe_diameter))
    }

    /// Diameter ratio β = d_choke / d_pipe
    pub fn beta(&self) -> f64 {
        self.choke_diameter_mm / self.pipe_diameter_mm
    }

    pub fn validate(&self) -> ChokeResult<()> {
        let d0 = self.choke_diameter_mm;
        let d1 = self.pipe_diameter_mm;
        if !d0.is_finite() || !d1.is_finite() || d0 <= 0.0 || d1 <= 0.0 {
            return Err(ChokeError::InvalidArg {
                what: "diameters must be positive",
            });
        }
        if d0 > d1 {
            return Err(ChokeError::InvalidArg {
                what: "choke diameter cannot exceed pipe diameter",
            });
        }
        Ok(())
    }
}

/// Everything about a choke query except its pressures.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChokeCase {
    pub mixture: Mixture,
    pub pvt: PvtParams,
    pub geometry: ChokeGeometry,
}

impl ChokeCase {
    /// Case with default PVT parameters and geometry.
    pub fn new(mixture: Mixture) -> Self {
        Self {
            mixture,
            pvt: PvtParams::default(),
            geometry: ChokeGeometry::default(),
        }
    }

    pub fn with_pvt(mut self, pvt: PvtParams) -> Self {
        self.pvt = pvt;
        self
    }

    pub fn with_geometry(mut self, geometry: ChokeGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_choke_diameter_mm(mut self, d_mm: f64) -> Self {
        self.geometry.choke_diameter_mm = d_mm;
        self
    }

    pub fn validate(&self) -> ChokeResult<()> {
        self.geometry.validate()?;
        self.mixture.fractions()?;
        if !self.mixture.is_steam() {
            self.pvt.validate()?;
        }
        Ok(())
    }
}
