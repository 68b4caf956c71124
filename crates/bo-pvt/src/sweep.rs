//! Pressure sweeps along the saturated line.
//!
//! A sweep samples a single-phase model at a list of pressures for one
//! region, evaluating both the undersaturated branch at the saturated ratio
//! and the saturated branch. Used by validation and the CLI.

use std::fmt;

use bo_core::RegionIdx;

use crate::error::{PvtError, PvtResult};
use crate::model::PvtModel;

/// Spacing of sweep points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepType {
    /// Uniformly spaced points
    #[default]
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

/// Pressure range [Pa] with a point count and spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureSweep {
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl PressureSweep {
    pub fn new(start: f64, end: f64, num_points: usize, sweep_type: SweepType) -> PvtResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(PvtError::InvalidArg {
                what: "sweep bounds must be finite",
            });
        }
        if num_points < 2 {
            return Err(PvtError::InvalidArg {
                what: "sweep must have at least 2 points",
            });
        }
        if (start - end).abs() < 1e-12 {
            return Err(PvtError::InvalidArg {
                what: "sweep start and end must differ",
            });
        }
        if sweep_type == SweepType::Logarithmic && (start <= 0.0 || end <= 0.0) {
            return Err(PvtError::InvalidArg {
                what: "logarithmic sweep needs positive bounds",
            });
        }
        Ok(Self {
            start,
            end,
            num_points,
            sweep_type,
        })
    }

    pub fn linear(start: f64, end: f64, num_points: usize) -> PvtResult<Self> {
        Self::new(start, end, num_points, SweepType::Linear)
    }

    /// 50 points from 10 bar in 12 bar steps, the grid `p_i = i/50 * 600 bar + 10 bar`.
    pub fn saturated_line_default() -> Self {
        Self {
            start: 10.0e5,
            end: 598.0e5,
            num_points: 50,
            sweep_type: SweepType::Linear,
        }
    }

    /// All sweep pressures, both bounds included.
    pub fn points(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start];
        }
        let n = self.num_points - 1;
        let mut points: Vec<f64> = match self.sweep_type {
            SweepType::Linear => {
                let delta = (self.end - self.start) / n as f64;
                (0..=n).map(|i| self.start + i as f64 * delta).collect()
            }
            SweepType::Logarithmic => {
                let (a, b) = (self.start.ln(), self.end.ln());
                let delta = (b - a) / n as f64;
                (0..=n).map(|i| (a + i as f64 * delta).exp()).collect()
            }
        };
        points[n] = self.end;
        points
    }
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

impl fmt::Display for PressureSweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pressure sweep from {} Pa to {} Pa ({} points, {})",
            self.start, self.end, self.num_points, self.sweep_type
        )
    }
}

/// One saturated-line evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturatedLineSample {
    pub pressure: f64,
    /// Saturated Rs or Rv (zero without dissolution)
    pub ratio: f64,
    /// `1/B` on the undersaturated branch at `ratio`
    pub inv_b: f64,
    pub inv_b_saturated: f64,
    pub viscosity: f64,
    pub viscosity_saturated: f64,
}

impl SaturatedLineSample {
    pub fn inv_b_deviation(&self) -> f64 {
        (self.inv_b - self.inv_b_saturated).abs()
    }

    pub fn viscosity_deviation(&self) -> f64 {
        (self.viscosity - self.viscosity_saturated).abs()
    }
}

/// Evaluate `model` along `sweep` in one region at fixed temperature.
pub fn sample_saturated_line<M: PvtModel>(
    model: &M,
    region: RegionIdx,
    temperature: f64,
    sweep: &PressureSweep,
) -> Vec<SaturatedLineSample> {
    sweep
        .points()
        .into_iter()
        .map(|p| {
            let ratio = model.saturated_dissolution_factor(region, temperature, p);
            SaturatedLineSample {
                pressure: p,
                ratio,
                inv_b: model.inverse_formation_volume_factor(region, temperature, p, ratio),
                inv_b_saturated: model
                    .saturated_inverse_formation_volume_factor(region, temperature, p),
                viscosity: model.viscosity(region, temperature, p, ratio),
                viscosity_saturated: model.saturated_viscosity(region, temperature, p),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_sweep_generation() {
        let sweep = PressureSweep::linear(1.0e5, 5.0e5, 5).unwrap();
        let points = sweep.points();
        assert_eq!(points.len(), 5);
        assert!((points[0] - 1.0e5).abs() < 1e-9);
        assert!((points[2] - 3.0e5).abs() < 1e-9);
        assert!((points[4] - 5.0e5).abs() < 1e-9);
    }

    #[test]
    fn logarithmic_sweep_generation() {
        let sweep = PressureSweep::new(1e5, 1e7, 3, SweepType::Logarithmic).unwrap();
        let points = sweep.points();
        assert_eq!(points.len(), 3);
        assert!((points[1] - 1e6).abs() / 1e6 < 1e-9);
        assert_eq!(points[2], 1e7);
    }

    #[test]
    fn default_grid_matches_fixed_steps() {
        let points = PressureSweep::saturated_line_default().points();
        assert_eq!(points.len(), 50);
        for (i, p) in points.iter().enumerate() {
            let expected = i as f64 / 50.0 * 600.0e5 + 10.0e5;
            assert!((p - expected).abs() < 1e-6, "point {i}: {p} vs {expected}");
        }
    }

    #[test]
    fn rejects_invalid_sweeps() {
        assert!(PressureSweep::linear(1.0, 2.0, 1).is_err());
        assert!(PressureSweep::linear(1.0, 1.0, 5).is_err());
        assert!(PressureSweep::new(0.0, 2.0, 5, SweepType::Logarithmic).is_err());
        assert!(PressureSweep::linear(f64::NAN, 2.0, 5).is_err());
    }
}
