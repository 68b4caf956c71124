//! Property contract shared by every single-phase PVT model.

use bo_core::{Evaluation, RegionIdx, ensure_positive};

use crate::error::{PvtError, PvtResult};

/// Trait for single-phase PVT models.
///
/// All methods are evaluated per PVT region. `ratio` is the dissolution
/// ratio carried by the phase: Rs for oil, Rv for gas. Models without
/// dissolution ignore it.
///
/// Implementations are immutable after construction and must be thread-safe
/// (Send + Sync); any number of threads may query one model concurrently.
///
/// # Panics
/// Every query panics if `region >= self.num_regions()`.
pub trait PvtModel: Send + Sync {
    /// Model name (for debugging/logging).
    fn name(&self) -> &'static str;

    /// Number of PVT regions the model holds data for.
    fn num_regions(&self) -> usize;

    /// Inverse formation volume factor `1/B` on the undersaturated branch.
    fn inverse_formation_volume_factor<E: Evaluation>(
        &self,
        region: RegionIdx,
        temperature: E,
        pressure: E,
        ratio: E,
    ) -> E;

    /// Dynamic viscosity [Pa·s] on the undersaturated branch.
    fn viscosity<E: Evaluation>(
        &self,
        region: RegionIdx,
        temperature: E,
        pressure: E,
        ratio: E,
    ) -> E;

    /// Maximum dissolution ratio at the given conditions (zero without dissolution).
    fn saturated_dissolution_factor<E: Evaluation>(
        &self,
        region: RegionIdx,
        temperature: E,
        pressure: E,
    ) -> E;

    /// Saturated dissolution ratio scaled by vaporization control.
    ///
    /// `saturation` and `max_saturation` are the current and historical
    /// maximum oil saturation, for Rs and Rv alike.
    fn saturated_dissolution_factor_with_saturation<E: Evaluation>(
        &self,
        region: RegionIdx,
        temperature: E,
        pressure: E,
        _saturation: E,
        _max_saturation: E,
    ) -> E {
        self.saturated_dissolution_factor(region, temperature, pressure)
    }

    /// Pressure at which `ratio` is the saturated dissolution ratio (zero without dissolution).
    fn saturation_pressure<E: Evaluation>(&self, region: RegionIdx, temperature: E, ratio: E)
    -> E;

    /// `1/B` exactly on the saturated line.
    ///
    /// Defined through the undersaturated branch at the saturated ratio so the
    /// two branches cannot drift apart.
    fn saturated_inverse_formation_volume_factor<E: Evaluation>(
        &self,
        region: RegionIdx,
        temperature: E,
        pressure: E,
    ) -> E {
        let ratio = self.saturated_dissolution_factor(region, temperature, pressure);
        self.inverse_formation_volume_factor(region, temperature, pressure, ratio)
    }

    /// Viscosity exactly on the saturated line.
    fn saturated_viscosity<E: Evaluation>(
        &self,
        region: RegionIdx,
        temperature: E,
        pressure: E,
    ) -> E {
        let ratio = self.saturated_dissolution_factor(region, temperature, pressure);
        self.viscosity(region, temperature, pressure, ratio)
    }
}

/// Oil-phase models. Rs is the dissolution ratio.
pub trait OilPvt: PvtModel {
    fn saturated_gas_dissolution_factor<E: Evaluation>(
        &self,
        region: RegionIdx,
        temperature: E,
        pressure: E,
    ) -> E {
        self.saturated_dissolution_factor(region, temperature, pressure)
    }

    /// Rs at saturation, scaled by the oil-saturation history (VAPPARS).
    fn saturated_gas_dissolution_factor_with_saturation<E: Evaluation>(
        &self,
        region: RegionIdx,
        temperature: E,
        pressure: E,
        oil_saturation: E,
        max_oil_saturation: E,
    ) -> E {
        self.saturated_dissolution_factor_with_saturation(
            region,
            temperature,
            pressure,
            oil_saturation,
            max_oil_saturation,
        )
    }
}

/// Gas-phase models. Rv is the dissolution ratio.
pub trait GasPvt: PvtModel {
    fn saturated_oil_vaporization_factor<E: Evaluation>(
        &self,
        region: RegionIdx,
        temperature: E,
        pressure: E,
    ) -> E {
        self.saturated_dissolution_factor(region, temperature, pressure)
    }

    /// Rv at saturation, scaled by the oil-saturation history (VAPPARS).
    fn saturated_oil_vaporization_factor_with_saturation<E: Evaluation>(
        &self,
        region: RegionIdx,
        temperature: E,
        pressure: E,
        oil_saturation: E,
        max_oil_saturation: E,
    ) -> E {
        self.saturated_dissolution_factor_with_saturation(
            region,
            temperature,
            pressure,
            oil_saturation,
            max_oil_saturation,
        )
    }
}

/// Water-phase models. Nothing dissolves in water.
pub trait WaterPvt: PvtModel {}

/// Vaporization-control exponent (the VAPPARS mechanism).
///
/// Reduces the saturated dissolution factor while the controlling saturation
/// is below its historical maximum:
///
/// ```text
/// R = R_sat * max(1e-3, (max(S, 1e-3) / S_max)^exponent)
/// ```
///
/// applied only if `exponent > 0`, `S_max > 0.01` and `S < S_max`
/// (`S_max` is clamped to 1).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VaporizationControl {
    pub exponent: f64,
}

impl VaporizationControl {
    const MIN_SATURATION: f64 = 1e-3;
    const MIN_FACTOR: f64 = 1e-3;

    pub fn new(exponent: f64) -> Self {
        Self { exponent }
    }

    pub fn is_active(&self) -> bool {
        self.exponent > 0.0
    }

    pub fn apply<E: Evaluation>(&self, saturated: E, saturation: E, max_saturation: E) -> E {
        let max_saturation = max_saturation.min(E::one());
        if !self.is_active()
            || max_saturation.value() <= 0.01
            || saturation.value() >= max_saturation.value()
        {
            return saturated;
        }
        let s = saturation.max(E::constant(Self::MIN_SATURATION));
        let factor = (s / max_saturation)
            .powf(self.exponent)
            .max(E::constant(Self::MIN_FACTOR));
        saturated * factor
    }
}

/// Per-region data lookup that fails fast on an invalid region.
#[inline]
pub(crate) fn region_data<'a, T>(data: &'a [T], region: RegionIdx, model: &'static str) -> &'a T {
    match data.get(region) {
        Some(d) => d,
        None => panic!(
            "{model}: PVT region {region} out of range ({} regions)",
            data.len()
        ),
    }
}

/// FVF and viscosity samples must be positive and finite.
pub(crate) fn ensure_positive_samples(
    values: &[f64],
    what: &'static str,
    region: RegionIdx,
) -> PvtResult<()> {
    for &v in values {
        ensure_positive(v, what).map_err(|_| PvtError::NonPhysical { what, region })?;
    }
    Ok(())
}

/// Querying a multiplexer that never got a model is a wiring bug.
#[cold]
pub(crate) fn uninitialized(phase: &'static str) -> ! {
    panic!("{phase} PVT multiplexer queried before initialization")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vaporization_control_inactive_by_default() {
        let vc = VaporizationControl::default();
        assert_eq!(vc.apply(100.0, 0.2, 0.8), 100.0);
    }

    #[test]
    fn vaporization_control_scales_below_max() {
        let vc = VaporizationControl::new(1.0);
        let r = vc.apply(100.0, 0.4, 0.8);
        assert!((r - 50.0).abs() < 1e-12);
        // at or above the historical maximum nothing changes
        assert_eq!(vc.apply(100.0, 0.8, 0.8), 100.0);
        // tiny historical maximum disables the control
        assert_eq!(vc.apply(100.0, 0.001, 0.005), 100.0);
    }

    #[test]
    fn vaporization_control_floors() {
        let vc = VaporizationControl::new(10.0);
        let r = vc.apply(100.0, 0.0, 1.0);
        assert!((r - 100.0 * 1e-3).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn region_lookup_panics() {
        let data = [1, 2];
        let _ = region_data(&data, 2, "test");
    }

    #[test]
    fn positive_samples() {
        assert!(ensure_positive_samples(&[1.0, 2.0], "fvf", 0).is_ok());
        assert!(ensure_positive_samples(&[1.0, -2.0], "fvf", 0).is_err());
        assert!(ensure_positive_samples(&[f64::INFINITY], "fvf", 0).is_err());
        assert!(matches!(
            ensure_positive_samples(&[1.0, f64::NAN], "fvf", 3),
            Err(PvtError::NonPhysical { region: 3, .. })
        ));
    }
}
