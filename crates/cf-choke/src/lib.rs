//! Choke flow correlations for multiphase well streams.
//!
//! Three correlations share one contract ([`ChokeCorrelation`]):
//! - [`Chien`]: homogeneous orifice equation, closed form, no choking model.
//! - [`AlSafran`]: slip model with a root-solved critical pressure ratio.
//! - [`Perkins`]: polytropic model in oilfield units with a mean-pressure
//!   heat-capacity fixed-point loop.
//!
//! Each accepts any of the four [`Mixture`] combinations. Fluid properties
//! come from a [`cf_fluids::FluidModel`] and are re-evaluated on every call.
//! [`InverseSolver`] backs out upstream pressure, downstream pressure or
//! pressure drop from a target rate; [`api`] wraps everything as plain
//! per-call functions.
//!
//! # Example
//!
//! ```no_run
//! use cf_choke::{ChokeCase, Method, Mixture, api};
//!
//! let case = ChokeCase::new(Mixture::gas_water(1.0));
//! let w = api::mass_rate_kghr(Method::Chien, &case, 20.0, 10.0)?;
//! let p1 = api::upstream_pressure_atm(Method::Chien, &case, w, 10.0)?;
//! assert!((p1 - 20.0).abs() < 1e-6);
//! # Ok::<(), cf_choke::ChokeError>(())
//! ```

pub mod alsafran;
pub mod api;
pub mod chien;
pub mod common;
pub mod correlation;
pub mod curves;
pub mod error;
pub mod inverse;
pub mod mixture;
pub mod perkins;
pub mod state;

pub use alsafran::AlSafran;
pub use chien::Chien;
pub use correlation::{ChokeCorrelation, FlowEstimate, Method};
pub use curves::{
    Curve, PressureSweep, downstream_pressure_vs_flow, flow_vs_downstream_pressure,
    upstream_pressure_vs_flow,
};
pub use error::{ChokeError, ChokeResult};
pub use inverse::{InverseSolver, InverseStatus, PressureSolution};
pub use mixture::{ChokeCase, ChokeGeometry, Mixture, PhaseFractions};
pub use perkins::Perkins;
pub use state::FluidState;
