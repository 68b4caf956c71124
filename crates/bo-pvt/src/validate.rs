//! Saturated-line validation.
//!
//! Checks two properties of every region of a model before it is used:
//! - consistency: the undersaturated branch at the saturated ratio equals the
//!   saturated branch for `1/B` and viscosity;
//! - monotonicity: the saturated Rs/Rv never decreases with pressure.

use bo_core::{RegionIdx, Tolerances, nearly_equal};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::{PvtError, PvtResult};
use crate::model::PvtModel;
use crate::sweep::{PressureSweep, SaturatedLineSample, sample_saturated_line};

/// Sweep, temperature and tolerance of a saturated-line check.
#[derive(Debug, Clone, Copy)]
pub struct SaturatedLineCheck {
    pub sweep: PressureSweep,
    /// Temperature [K]
    pub temperature: f64,
    pub tolerance: Tolerances,
}

impl Default for SaturatedLineCheck {
    fn default() -> Self {
        Self {
            sweep: PressureSweep::saturated_line_default(),
            temperature: 273.0,
            tolerance: Tolerances::saturated_line(),
        }
    }
}

/// Summary of a successful check.
#[derive(Debug, Clone, PartialEq)]
pub struct SaturatedLineReport {
    pub model: &'static str,
    pub num_regions: usize,
    pub num_points: usize,
    pub max_inv_b_deviation: f64,
    pub max_viscosity_deviation: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct RegionSummary {
    max_inv_b_deviation: f64,
    max_viscosity_deviation: f64,
}

impl SaturatedLineCheck {
    /// Check every region of `model`. Regions are checked in parallel.
    pub fn run<M: PvtModel>(&self, model: &M) -> PvtResult<SaturatedLineReport> {
        let num_regions = model.num_regions();

        #[cfg(feature = "rayon")]
        let summaries = (0..num_regions)
            .into_par_iter()
            .map(|region| self.check_region(model, region))
            .collect::<PvtResult<Vec<_>>>();
        #[cfg(not(feature = "rayon"))]
        let summaries = (0..num_regions)
            .map(|region| self.check_region(model, region))
            .collect::<PvtResult<Vec<_>>>();

        let summaries = summaries.inspect_err(|e| {
            warn!(model = model.name(), error = %e, "saturated line check failed");
        })?;

        let report = SaturatedLineReport {
            model: model.name(),
            num_regions,
            num_points: self.sweep.num_points,
            max_inv_b_deviation: summaries
                .iter()
                .map(|s| s.max_inv_b_deviation)
                .fold(0.0, f64::max),
            max_viscosity_deviation: summaries
                .iter()
                .map(|s| s.max_viscosity_deviation)
                .fold(0.0, f64::max),
        };
        info!(
            model = report.model,
            regions = report.num_regions,
            max_inv_b_deviation = report.max_inv_b_deviation,
            max_viscosity_deviation = report.max_viscosity_deviation,
            "saturated line consistent"
        );
        Ok(report)
    }

    fn check_region<M: PvtModel>(&self, model: &M, region: RegionIdx) -> PvtResult<RegionSummary> {
        let samples = sample_saturated_line(model, region, self.temperature, &self.sweep);
        let mut summary = RegionSummary::default();
        let mut previous: Option<f64> = None;
        for s in &samples {
            self.check_sample(s, region)?;
            summary.max_inv_b_deviation = summary.max_inv_b_deviation.max(s.inv_b_deviation());
            summary.max_viscosity_deviation =
                summary.max_viscosity_deviation.max(s.viscosity_deviation());

            if let Some(prev) = previous {
                if s.ratio < prev - self.tolerance.abs {
                    return Err(PvtError::NonMonotonicSaturatedLine {
                        what: "dissolution factor",
                        region,
                        pressure: s.pressure,
                    });
                }
            }
            previous = Some(s.ratio);
        }
        Ok(summary)
    }

    fn check_sample(&self, s: &SaturatedLineSample, region: RegionIdx) -> PvtResult<()> {
        let physical = |v: f64| v.is_finite() && v > 0.0;
        if !physical(s.inv_b) || !physical(s.viscosity) || !s.ratio.is_finite() {
            return Err(PvtError::NonPhysical {
                what: "saturated line sample",
                region,
            });
        }
        if !nearly_equal(s.inv_b, s.inv_b_saturated, self.tolerance) {
            return Err(PvtError::InconsistentSaturatedLine {
                what: "inverse formation volume factor",
                region,
                pressure: s.pressure,
                undersaturated: s.inv_b,
                saturated: s.inv_b_saturated,
            });
        }
        if !nearly_equal(s.viscosity, s.viscosity_saturated, self.tolerance) {
            return Err(PvtError::InconsistentSaturatedLine {
                what: "viscosity",
                region,
                pressure: s.pressure,
                undersaturated: s.viscosity,
                saturated: s.viscosity_saturated,
            });
        }
        Ok(())
    }
}
