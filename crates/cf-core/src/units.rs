// cf-core/src/units.rs

use uom::si::f64::{
    Length as UomLength, MassDensity as UomMassDensity, MassRate as UomMassRate,
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type Length = UomLength;
pub type MassRate = UomMassRate;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

/// Standard atmospheres. Correlation inputs are quoted in atm.
#[inline]
pub fn atm(v: f64) -> Pressure {
    use uom::si::pressure::atmosphere;
    Pressure::new::<atmosphere>(v)
}

#[inline]
pub fn mpa(v: f64) -> Pressure {
    use uom::si::pressure::megapascal;
    Pressure::new::<megapascal>(v)
}

/// Millimetres. Choke and pipe bores are quoted in mm.
#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn to_mm(l: Length) -> f64 {
    use uom::si::length::millimeter;
    l.get::<millimeter>()
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn kgph(v: f64) -> MassRate {
    kgps(v / 3600.0)
}

#[inline]
pub fn kgm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn to_atm(p: Pressure) -> f64 {
    use uom::si::pressure::atmosphere;
    p.get::<atmosphere>()
}

#[inline]
pub fn to_mpa(p: Pressure) -> f64 {
    use uom::si::pressure::megapascal;
    p.get::<megapascal>()
}

#[inline]
pub fn to_kgph(w: MassRate) -> f64 {
    w.value * 3600.0
}

pub mod constants {
    /// Universal gas constant [J/(mol·K)]
    pub const R_J_PER_MOL_K: f64 = 8.314_462_618;

    /// Molar mass of air [kg/mol]
    pub const M_AIR_KG_PER_MOL: f64 = 0.028_97;

    #[inline]
    pub fn degc_to_degf(t_c: f64) -> f64 {
        1.8 * t_c + 32.0
    }
}

/// Oilfield (psia, ft, lbm, °F) conversion factors used by the choke
/// correlations. Values are the ones the correlations were fitted with and are
/// not exact SI conversions.
pub mod field {
    /// psia per correlation atmosphere (kgf/cm²)
    pub const PSIA_PER_ATM: f64 = 14.2233;

    /// kPa per correlation atmosphere. Property lookups use the same basis,
    /// so 1 atm here is 1 bar.
    pub const KPA_PER_ATM: f64 = 100.0;

    pub const MM_PER_FT: f64 = 304.8;

    pub const KG_PER_LBM: f64 = 0.45359;

    /// lbm/ft³ per kg/m³
    pub const LBM_FT3_PER_KG_M3: f64 = 0.062428;

    /// ft³/lbm per m³/kg
    pub const FT3_LBM_PER_M3_KG: f64 = 16.01845;

    pub const FT_LBF_PER_BTU: f64 = 778.169;

    /// Btu/(lbm·°F) per kJ/(kg·K)
    pub const BTU_LBM_F_PER_KJ_KG_K: f64 = 0.24;

    /// Gravitational conversion constant [lbm·ft/(lbf·s²)]
    pub const GC: f64 = 32.17;

    /// Gas constant [ft·lbf/(lbmol·°R)]
    pub const R_FT_LBF: f64 = 1545.348;

    /// Provider pressure for a correlation pressure in atm.
    #[inline]
    pub fn pressure(p_atm: f64) -> super::Pressure {
        super::pa(p_atm * KPA_PER_ATM * 1000.0)
    }

    /// Heat capacity in J/(kg·K) expressed as ft·lbf/(lbm·°F).
    #[inline]
    pub fn heat_capacity_field(cv_j_kg_k: f64) -> f64 {
        cv_j_kg_k / 1000.0 * BTU_LBM_F_PER_KJ_KG_K * FT_LBF_PER_BTU
    }
}
