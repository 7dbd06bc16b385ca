//! The contract shared by the choke correlations.

use crate::alsafran::AlSafran;
use crate::chien::Chien;
use crate::error::ChokeResult;
use crate::mixture::ChokeCase;
use crate::perkins::Perkins;
use cf_core::units::{MassRate, kgph, to_kgph};
use cf_fluids::FluidModel;

/// Result of one forward evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowEstimate {
    pub mass_rate: MassRate,
    /// Throat-to-upstream pressure ratio the flow was evaluated at
    pub pressure_ratio: f64,
    /// Critical pressure ratio, when the correlation has a choking model
    pub critical_ratio: Option<f64>,
    /// Whether the critical ratio governed the flow
    pub choked: bool,
    /// False if any internal root search or iteration stopped unconverged
    pub converged: bool,
    /// Coefficient updates performed by an outer fixed-point loop
    pub iterations: usize,
}

impl FlowEstimate {
    /// Unchoked estimate from a closed-form correlation.
    pub fn closed_form(w_kghr: f64, pressure_ratio: f64) -> Self {
        Self {
            mass_rate: kgph(w_kghr),
            pressure_ratio,
            critical_ratio: None,
            choked: false,
            converged: true,
            iterations: 0,
        }
    }

    pub fn kg_per_hour(&self) -> f64 {
        to_kgph(self.mass_rate)
    }
}

/// A choke flow correlation.
///
/// Pressures are in atmospheres. Implementations evaluate fluid properties
/// through `model` on every call and keep no state between calls.
pub trait ChokeCorrelation: Send + Sync {
    /// Correlation name for diagnostics.
    fn name(&self) -> &str;

    /// Mass flow for upstream `p1_atm` and downstream `p2_atm`.
    ///
    /// Zero when `p2_atm >= p1_atm`.
    fn flow(
        &self,
        model: &dyn FluidModel,
        case: &ChokeCase,
        p1_atm: f64,
        p2_atm: f64,
    ) -> ChokeResult<FlowEstimate>;

    /// Flow at the critical pressure ratio, independent of downstream
    /// pressure.
    ///
    /// `None` for correlations without a choking model.
    fn critical_flow(
        &self,
        _model: &dyn FluidModel,
        _case: &ChokeCase,
        _p1_atm: f64,
    ) -> ChokeResult<Option<FlowEstimate>> {
        Ok(None)
    }

    /// Downstream pressure [atm] producing `w_kghr`, when the correlation
    /// inverts in closed form.
    ///
    /// `None` means callers must fall back to a root search.
    fn downstream_pressure(
        &self,
        _model: &dyn FluidModel,
        _case: &ChokeCase,
        _p1_atm: f64,
        _w_kghr: f64,
    ) -> ChokeResult<Option<f64>> {
        Ok(None)
    }
}

/// Correlation selector for the per-call API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    Chien,
    AlSafran,
    Perkins,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::Chien, Method::AlSafran, Method::Perkins];

    /// Correlation with its default constants.
    pub fn correlation(self) -> Box<dyn ChokeCorrelation> {
        match self {
            Method::Chien => Box::new(Chien::default()),
            Method::AlSafran => Box::new(AlSafran::default()),
            Method::Perkins => Box::new(Perkins::default()),
        }
    }

    /// Whether the correlation models critical flow.
    pub fn has_critical_flow(self) -> bool {
        !matches!(self, Method::Chien)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Chien => write!(f, "Chien"),
            Method::AlSafran => write!(f, "Al-Safran"),
            Method::Perkins => write!(f, "Perkins"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_form_estimate_is_unchoked() {
        let est = FlowEstimate::closed_form(263.0, 0.5);
        assert!((est.kg_per_hour() - 263.0).abs() < 1e-9);
        assert!(!est.choked);
        assert!(est.converged);
        assert!(est.critical_ratio.is_none());
    }

    #[test]
    fn method_names() {
        for method in Method::ALL {
            assert_eq!(method.correlation().name(), method.to_string());
        }
        assert!(!Method::Chien.has_critical_flow());
        assert!(Method::Perkins.has_critical_flow());
    }
}
