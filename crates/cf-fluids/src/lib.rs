//! cf-fluids: fluid property providers for chokeflow.
//!
//! Provides:
//! - `FluidModel`, the property-provider trait the choke correlations query
//! - Black-oil hydrocarbon PVT (gas density, Z factor, oil density)
//! - IAPWS-IF97 saturated water and steam (via `seuif97`)
//! - `StandardFluidModel`, combining both behind one provider
//!
//! # Example
//!
//! ```no_run
//! use cf_core::units::atm;
//! use cf_fluids::{FluidModel, PvtParams, StandardFluidModel};
//!
//! let model = StandardFluidModel::default();
//! let pvt = PvtParams::default();
//!
//! let gas = model.gas(atm(20.0), &pvt).unwrap();
//! let steam = model.saturated_vapour(atm(20.0)).unwrap();
//! println!("gas: {} kg/m³, z = {:.3}", gas.density.value, gas.z);
//! println!("steam: {} kg/m³", steam.density.value);
//! ```

pub mod black_oil;
pub mod error;
pub mod model;
pub mod pvt;
pub mod standard;
pub mod steam;

// Re-exports for ergonomics
pub use black_oil::{BlackOilConfig, BlackOilModel, z_factor_dak};
pub use error::{FluidError, FluidResult};
pub use model::{FluidModel, GasProperties, OilProperties, PhaseProperties, SpecHeatCapacity};
pub use pvt::PvtParams;
pub use standard::StandardFluidModel;
pub use steam::{If97SteamModel, saturation_temperature};
