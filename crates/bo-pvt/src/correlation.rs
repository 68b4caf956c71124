//! Constant-compressibility correlation shared by the oil (PVCDO) and water (PVTW) models.

use bo_core::{Evaluation, RegionIdx, ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};

use crate::error::{PvtError, PvtResult};

/// Reference state of a constant-compressibility fluid in one region.
///
/// All values in SI: pressure [Pa], formation volume factor [-],
/// compressibility and viscosibility [1/Pa], viscosity [Pa·s].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstantCompressibilityRecord {
    pub reference_pressure: f64,
    pub reference_fvf: f64,
    pub compressibility: f64,
    pub reference_viscosity: f64,
    #[serde(default)]
    pub viscosibility: f64,
}

impl ConstantCompressibilityRecord {
    pub(crate) fn validate(&self, what: &'static str, region: RegionIdx) -> PvtResult<()> {
        ensure_finite(self.reference_pressure, what)?;
        ensure_finite(self.compressibility, what)?;
        ensure_finite(self.viscosibility, what)?;
        for v in [self.reference_fvf, self.reference_viscosity] {
            ensure_positive(v, what).map_err(|_| PvtError::NonPhysical { what, region })?;
        }
        Ok(())
    }

    /// `1/B = (1 + X (1 + X/2)) / B_ref` with `X = c (p - p_ref)`.
    ///
    /// Second-order expansion of `exp(X) / B_ref`.
    #[inline]
    pub fn inverse_formation_volume_factor<E: Evaluation>(&self, pressure: E) -> E {
        let x = (pressure - self.reference_pressure) * self.compressibility;
        (x * (x * 0.5 + 1.0) + 1.0) / self.reference_fvf
    }

    /// `mu = mu_ref B_ref (1/B) / (1 + Y (1 + Y/2))` with `Y = (c - c_v)(p - p_ref)`.
    #[inline]
    pub fn viscosity<E: Evaluation>(&self, pressure: E) -> E {
        let inv_b = self.inverse_formation_volume_factor(pressure);
        let y = (pressure - self.reference_pressure) * (self.compressibility - self.viscosibility);
        inv_b * (self.reference_viscosity * self.reference_fvf) / (y * (y * 0.5 + 1.0) + 1.0)
    }
}
