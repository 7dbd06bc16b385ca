//! Pressure and flow sweeps for plotting choke characteristics.
//!
//! Points are evaluated one after another; every point is an independent
//! correlation call.

use crate::correlation::ChokeCorrelation;
use crate::error::{ChokeError, ChokeResult};
use crate::inverse::InverseSolver;
use crate::mixture::ChokeCase;
use cf_fluids::FluidModel;
use std::fmt;

/// Uniformly spaced pressures [atm].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PressureSweep {
    pub start_atm: f64,
    pub end_atm: f64,
    pub num_points: usize,
}

impl PressureSweep {
    pub fn new(start_atm: f64, end_atm: f64, num_points: usize) -> ChokeResult<Self> {
        if num_points < 2 {
            return Err(ChokeError::InvalidArg {
                what: "sweep must have at least 2 points",
            });
        }
        if !start_atm.is_finite() || !end_atm.is_finite() || start_atm < 0.0 || end_atm < 0.0 {
            return Err(ChokeError::InvalidArg {
                what: "sweep pressures must be non-negative",
            });
        }
        if (start_atm - end_atm).abs() < 1e-12 {
            return Err(ChokeError::InvalidArg {
                what: "sweep start and end must differ",
            });
        }
        Ok(Self {
            start_atm,
            end_atm,
            num_points,
        })
    }

    /// All sweep points, ends included exactly.
    pub fn points(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start_atm];
        }

        let delta = (self.end_atm - self.start_atm) / (self.num_points - 1) as f64;
        let mut points: Vec<f64> = (0..self.num_points)
            .map(|i| self.start_atm + i as f64 * delta)
            .collect();

        // Ensure exact endpoint
        points[self.num_points - 1] = self.end_atm;
        points
    }
}

impl fmt::Display for PressureSweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {} atm ({} points)",
            self.start_atm, self.end_atm, self.num_points
        )
    }
}

/// Paired samples of one choke characteristic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Curve {
    fn with_capacity(n: usize) -> Self {
        Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, x: f64, y: f64) {
        self.x.push(x);
        self.y.push(y);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Mass rate [kg/h] against downstream pressure [atm] at fixed p1.
pub fn flow_vs_downstream_pressure(
    correlation: &dyn ChokeCorrelation,
    model: &dyn FluidModel,
    case: &ChokeCase,
    p1_atm: f64,
    sweep: &PressureSweep,
) -> ChokeResult<Curve> {
    let points = sweep.points();
    let mut curve = Curve::with_capacity(points.len());
    for p2 in points {
        let w = correlation.flow(model, case, p1_atm, p2)?.kg_per_hour();
        curve.push(p2, w);
    }
    Ok(curve)
}

/// Upstream pressure [atm] against mass rate [kg/h] at fixed p2.
pub fn upstream_pressure_vs_flow(
    correlation: &dyn ChokeCorrelation,
    model: &dyn FluidModel,
    case: &ChokeCase,
    p2_atm: f64,
    flows_kghr: &[f64],
) -> ChokeResult<Curve> {
    let solver = InverseSolver::new(correlation, model, case);
    let mut curve = Curve::with_capacity(flows_kghr.len());
    for &w in flows_kghr {
        let sol = solver.upstream_pressure(w, p2_atm)?;
        curve.push(w, sol.pressure_atm);
    }
    Ok(curve)
}

/// Downstream pressure [atm] against mass rate [kg/h] at fixed p1.
///
/// Over-critical rates keep the zero sentinel.
pub fn downstream_pressure_vs_flow(
    correlation: &dyn ChokeCorrelation,
    model: &dyn FluidModel,
    case: &ChokeCase,
    p1_atm: f64,
    flows_kghr: &[f64],
) -> ChokeResult<Curve> {
    let solver = InverseSolver::new(correlation, model, case);
    let mut curve = Curve::with_capacity(flows_kghr.len());
    for &w in flows_kghr {
        let sol = solver.downstream_pressure(w, p1_atm)?;
        curve.push(w, sol.pressure_atm);
    }
    Ok(curve)
}
