//! Default provider: black-oil hydrocarbons plus IF97 water and steam.

use crate::black_oil::{BlackOilConfig, BlackOilModel};
use crate::error::FluidResult;
use crate::model::{FluidModel, GasProperties, OilProperties, PhaseProperties};
use crate::pvt::PvtParams;
use crate::steam::If97SteamModel;
use cf_core::units::Pressure;

#[derive(Clone, Debug, Default)]
pub struct StandardFluidModel {
    black_oil: BlackOilModel,
    steam: If97SteamModel,
}

impl StandardFluidModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the black-oil heat capacities and Z-factor iteration.
    pub fn with_black_oil(mut self, config: BlackOilConfig) -> Self {
        self.black_oil = BlackOilModel::new(config);
        self
    }

    pub fn black_oil_config(&self) -> &BlackOilConfig {
        &self.black_oil.config
    }
}

impl FluidModel for StandardFluidModel {
    fn name(&self) -> &str {
        "black-oil + IF97"
    }

    fn gas(&self, p: Pressure, pvt: &PvtParams) -> FluidResult<GasProperties> {
        self.black_oil.gas(p, pvt)
    }

    fn oil(&self, p: Pressure, pvt: &PvtParams) -> FluidResult<OilProperties> {
        self.black_oil.oil(p, pvt)
    }

    fn saturated_liquid(&self, p: Pressure) -> FluidResult<PhaseProperties> {
        self.steam.saturated_liquid(p)
    }

    fn saturated_vapour(&self, p: Pressure) -> FluidResult<PhaseProperties> {
        self.steam.saturated_vapour(p)
    }
}
