//! Saturated water and steam from IAPWS-IF97.
//!
//! Everything goes through `seuif97`, which works in MPa, °C and kJ. The
//! saturation temperature is read off the region-4 line at quality 0; phase
//! properties at saturation are evaluated in region 1 (liquid) and region 2
//! (vapour).

use crate::error::{FluidError, FluidResult};
use crate::model::{PhaseProperties, validation};
use cf_core::units::{Pressure, Temperature, degc, kgm3, to_mpa};
use seuif97::{OCP, OCV, OT, OV, pt, px};

/// Triple-point pressure [MPa]
pub const P_TRIPLE_MPA: f64 = 611.213e-6;

/// Critical pressure [MPa]
pub const P_CRIT_MPA: f64 = 22.064;

/// Critical temperature [°C]
const T_CRIT_C: f64 = 373.946;

const IF97_LIQUID: i32 = 1;
const IF97_VAPOUR: i32 = 2;

/// Saturation temperature at pressure `p` (IF97 region 4).
pub fn saturation_temperature(p: Pressure) -> FluidResult<Temperature> {
    validation::validate_pressure(p)?;
    let p_mpa = to_mpa(p);
    if !(P_TRIPLE_MPA..=P_CRIT_MPA).contains(&p_mpa) {
        return Err(FluidError::OutOfRange {
            what: "saturation pressure",
        });
    }

    let t_c = px(p_mpa, 0.0, OT);
    if !(0.0..=T_CRIT_C).contains(&t_c) {
        return Err(FluidError::Backend {
            message: format!("IF97 saturation temperature evaluated to {t_c} °C"),
        });
    }
    Ok(degc(t_c))
}

/// Saturated water/steam provider backed by `seuif97`.
#[derive(Clone, Debug, Default)]
pub struct If97SteamModel;

impl If97SteamModel {
    pub fn new() -> Self {
        Self
    }

    pub fn saturated_liquid(&self, p: Pressure) -> FluidResult<PhaseProperties> {
        self.at_saturation(p, IF97_LIQUID)
    }

    pub fn saturated_vapour(&self, p: Pressure) -> FluidResult<PhaseProperties> {
        self.at_saturation(p, IF97_VAPOUR)
    }

    fn at_saturation(&self, p: Pressure, region: i32) -> FluidResult<PhaseProperties> {
        let t_sat = saturation_temperature(p)?;
        let p_mpa = to_mpa(p);
        let t_c = t_sat.value - 273.15;

        let v = backend_value(pt(p_mpa, t_c, (OV, region)), "specific volume")?;
        let cp = backend_value(pt(p_mpa, t_c, (OCP, region)), "cp")?;
        let cv = backend_value(pt(p_mpa, t_c, (OCV, region)), "cv")?;

        let props = PhaseProperties {
            density: kgm3(1.0 / v),
            cv: cv * 1000.0,
            cp: cp * 1000.0,
        };
        validation::validate_phase(&props)?;
        Ok(props)
    }
}

fn backend_value(v: f64, what: &str) -> FluidResult<f64> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(FluidError::Backend {
            message: format!("IF97 {what} evaluated to {v}"),
        })
    }
}
