//! The black-oil fluid system: per-phase PVT models plus phase bookkeeping.

use bo_core::{Component, Evaluation, Phase, RegionIdx};
use bo_pvt::{
    GasPvt, GasPvtMultiplexer, OilPvt, OilPvtMultiplexer, PvtModel, WaterPvtMultiplexer,
};

use crate::phase_map::PhaseIndexMap;
use crate::source::FluidStateSource;

/// Rs (or Rv) within this relative distance of saturation counts as saturated.
const SATURATED_FRACTION: f64 = 1.0 - 1e-10;

/// Immutable black-oil fluid system, built by [`crate::FluidSystemBuilder`].
///
/// Property methods take any [`FluidStateSource`] and a PVT region. Querying
/// an inactive phase or a region out of range panics.
#[derive(Debug, Clone)]
pub struct BlackOilFluidSystem {
    pub(crate) oil: OilPvtMultiplexer,
    pub(crate) gas: GasPvtMultiplexer,
    pub(crate) water: WaterPvtMultiplexer,
    pub(crate) phase_map: PhaseIndexMap,
    pub(crate) num_regions: usize,
    pub(crate) enable_dissolved_gas: bool,
    pub(crate) enable_vaporized_oil: bool,
    pub(crate) enable_energy: bool,
    /// Surface densities per region, canonical phase order
    pub(crate) reference_densities: Vec<[f64; Phase::COUNT]>,
    pub(crate) reservoir_temperature: Vec<f64>,
}

impl BlackOilFluidSystem {
    pub fn phase_is_active(&self, phase: Phase) -> bool {
        self.phase_map.is_active(phase)
    }

    pub fn num_active_phases(&self) -> usize {
        self.phase_map.num_active()
    }

    pub fn phase_map(&self) -> &PhaseIndexMap {
        &self.phase_map
    }

    pub fn num_regions(&self) -> usize {
        self.num_regions
    }

    pub fn enable_dissolved_gas(&self) -> bool {
        self.enable_dissolved_gas
    }

    pub fn enable_vaporized_oil(&self) -> bool {
        self.enable_vaporized_oil
    }

    pub fn enable_energy(&self) -> bool {
        self.enable_energy
    }

    pub fn oil_pvt(&self) -> &OilPvtMultiplexer {
        &self.oil
    }

    pub fn gas_pvt(&self) -> &GasPvtMultiplexer {
        &self.gas
    }

    pub fn water_pvt(&self) -> &WaterPvtMultiplexer {
        &self.water
    }

    /// Surface density of `phase` in `region` [kg/m³].
    #[track_caller]
    pub fn reference_density(&self, phase: Phase, region: RegionIdx) -> f64 {
        self.check_region(region);
        self.reference_densities[region][phase.index()]
    }

    /// Reservoir temperature of `region` [K].
    #[track_caller]
    pub fn reservoir_temperature(&self, region: RegionIdx) -> f64 {
        self.check_region(region);
        self.reservoir_temperature[region]
    }

    #[inline]
    #[track_caller]
    fn check_region(&self, region: RegionIdx) {
        assert!(
            region < self.num_regions,
            "PVT region {region} out of range ({} regions)",
            self.num_regions
        );
    }

    #[track_caller]
    fn check_active(&self, phase: Phase) {
        assert!(self.phase_is_active(phase), "phase {phase} is not active");
    }

    /// Viscosity [Pa·s], switching to the saturated branch when the
    /// other hydrocarbon phase is present and the phase is saturated.
    pub fn viscosity<E, S>(&self, fs: &S, phase: Phase, region: RegionIdx) -> E
    where
        E: Evaluation,
        S: FluidStateSource<E> + ?Sized,
    {
        self.check_active(phase);
        let p = fs.pressure(phase);
        let t = fs.temperature(phase);
        match phase {
            Phase::Oil => {
                if !self.enable_dissolved_gas {
                    return self.oil.viscosity(region, t, p, E::zero());
                }
                let rs = self.rs_of(fs, region);
                if self.oil_is_saturated(fs, region, t, p, rs) {
                    self.oil.saturated_viscosity(region, t, p)
                } else {
                    self.oil.viscosity(region, t, p, rs)
                }
            }
            Phase::Gas => {
                if !self.enable_vaporized_oil {
                    return self.gas.viscosity(region, t, p, E::zero());
                }
                let rv = self.rv_of(fs, region);
                if self.gas_is_saturated(fs, region, t, p, rv) {
                    self.gas.saturated_viscosity(region, t, p)
                } else {
                    self.gas.viscosity(region, t, p, rv)
                }
            }
            Phase::Water => self.water.viscosity(region, t, p, E::zero()),
        }
    }

    /// `1/B` of a phase, with the same saturated switch as [`Self::viscosity`].
    pub fn inverse_formation_volume_factor<E, S>(&self, fs: &S, phase: Phase, region: RegionIdx) -> E
    where
        E: Evaluation,
        S: FluidStateSource<E> + ?Sized,
    {
        self.check_active(phase);
        let p = fs.pressure(phase);
        let t = fs.temperature(phase);
        match phase {
            Phase::Oil => {
                if !self.enable_dissolved_gas {
                    return self.oil.inverse_formation_volume_factor(region, t, p, E::zero());
                }
                let rs = self.rs_of(fs, region);
                if self.oil_is_saturated(fs, region, t, p, rs) {
                    self.oil.saturated_inverse_formation_volume_factor(region, t, p)
                } else {
                    self.oil.inverse_formation_volume_factor(region, t, p, rs)
                }
            }
            Phase::Gas => {
                if !self.enable_vaporized_oil {
                    return self.gas.inverse_formation_volume_factor(region, t, p, E::zero());
                }
                let rv = self.rv_of(fs, region);
                if self.gas_is_saturated(fs, region, t, p, rv) {
                    self.gas.saturated_inverse_formation_volume_factor(region, t, p)
                } else {
                    self.gas.inverse_formation_volume_factor(region, t, p, rv)
                }
            }
            Phase::Water => self
                .water
                .inverse_formation_volume_factor(region, t, p, E::zero()),
        }
    }

    /// `1/B` on the saturated branch.
    pub fn saturated_inverse_formation_volume_factor<E, S>(
        &self,
        fs: &S,
        phase: Phase,
        region: RegionIdx,
    ) -> E
    where
        E: Evaluation,
        S: FluidStateSource<E> + ?Sized,
    {
        self.check_active(phase);
        let p = fs.pressure(phase);
        let t = fs.temperature(phase);
        match phase {
            Phase::Oil => self.oil.saturated_inverse_formation_volume_factor(region, t, p),
            Phase::Gas => self.gas.saturated_inverse_formation_volume_factor(region, t, p),
            Phase::Water => self.water.saturated_inverse_formation_volume_factor(region, t, p),
        }
    }

    /// Saturated Rs for oil, Rv for gas, zero for water.
    pub fn saturated_dissolution_factor<E, S>(&self, fs: &S, phase: Phase, region: RegionIdx) -> E
    where
        E: Evaluation,
        S: FluidStateSource<E> + ?Sized,
    {
        self.check_active(phase);
        let p = fs.pressure(phase);
        let t = fs.temperature(phase);
        match phase {
            Phase::Oil => self.oil.saturated_gas_dissolution_factor(region, t, p),
            Phase::Gas => self.gas.saturated_oil_vaporization_factor(region, t, p),
            Phase::Water => E::zero(),
        }
    }

    /// Like [`Self::saturated_dissolution_factor`], scaled by the oil
    /// saturation history under vaporization control.
    pub fn saturated_dissolution_factor_with_max_oil_saturation<E, S>(
        &self,
        fs: &S,
        phase: Phase,
        region: RegionIdx,
        max_oil_saturation: E,
    ) -> E
    where
        E: Evaluation,
        S: FluidStateSource<E> + ?Sized,
    {
        self.check_active(phase);
        let p = fs.pressure(phase);
        let t = fs.temperature(phase);
        let so = if self.phase_is_active(Phase::Oil) {
            fs.saturation(Phase::Oil)
        } else {
            E::zero()
        };
        match phase {
            Phase::Oil => self.oil.saturated_gas_dissolution_factor_with_saturation(
                region,
                t,
                p,
                so,
                max_oil_saturation,
            ),
            Phase::Gas => self.gas.saturated_oil_vaporization_factor_with_saturation(
                region,
                t,
                p,
                so,
                max_oil_saturation,
            ),
            Phase::Water => E::zero(),
        }
    }

    /// Bubble-point pressure for oil, dew-point pressure for gas, zero for water.
    pub fn saturation_pressure<E, S>(&self, fs: &S, phase: Phase, region: RegionIdx) -> E
    where
        E: Evaluation,
        S: FluidStateSource<E> + ?Sized,
    {
        self.check_active(phase);
        let t = fs.temperature(phase);
        match phase {
            Phase::Oil => self.oil.saturation_pressure(region, t, self.rs_of(fs, region)),
            Phase::Gas => self.gas.saturation_pressure(region, t, self.rv_of(fs, region)),
            Phase::Water => E::zero(),
        }
    }

    /// Phase density at reservoir conditions [kg/m³].
    pub fn density<E, S>(&self, fs: &S, phase: Phase, region: RegionIdx) -> E
    where
        E: Evaluation,
        S: FluidStateSource<E> + ?Sized,
    {
        let inv_b = self.inverse_formation_volume_factor(fs, phase, region);
        let rho_ref = self.reference_density(phase, region);
        match phase {
            Phase::Oil if self.enable_dissolved_gas => {
                let rs = self.rs_of(fs, region);
                inv_b * (rs * self.reference_density(Phase::Gas, region) + rho_ref)
            }
            Phase::Gas if self.enable_vaporized_oil => {
                let rv = self.rv_of(fs, region);
                inv_b * (rv * self.reference_density(Phase::Oil, region) + rho_ref)
            }
            _ => inv_b * rho_ref,
        }
    }

    pub fn convert_xog_to_rs<E: Evaluation>(&self, xog: E, region: RegionIdx) -> E {
        let rho_o = self.reference_density(Phase::Oil, region);
        let rho_g = self.reference_density(Phase::Gas, region);
        xog / (E::one() - xog) * (rho_o / rho_g)
    }

    pub fn convert_rs_to_xog<E: Evaluation>(&self, rs: E, region: RegionIdx) -> E {
        let rho_o = self.reference_density(Phase::Oil, region);
        let rho_g = self.reference_density(Phase::Gas, region);
        let rho_og = rs * rho_g;
        rho_og / (rho_og + rho_o)
    }

    pub fn convert_xgo_to_rv<E: Evaluation>(&self, xgo: E, region: RegionIdx) -> E {
        let rho_o = self.reference_density(Phase::Oil, region);
        let rho_g = self.reference_density(Phase::Gas, region);
        xgo / (E::one() - xgo) * (rho_g / rho_o)
    }

    pub fn convert_rv_to_xgo<E: Evaluation>(&self, rv: E, region: RegionIdx) -> E {
        let rho_o = self.reference_density(Phase::Oil, region);
        let rho_g = self.reference_density(Phase::Gas, region);
        let rho_go = rv * rho_o;
        rho_go / (rho_go + rho_g)
    }

    /// Rs of a source: its own value, else derived from the gas mass
    /// fraction in oil, else zero.
    pub fn rs_of<E, S>(&self, fs: &S, region: RegionIdx) -> E
    where
        E: Evaluation,
        S: FluidStateSource<E> + ?Sized,
    {
        if let Some(rs) = fs.rs() {
            return rs;
        }
        match fs.mass_fraction(Phase::Oil, Component::Gas) {
            Some(xog) => self.convert_xog_to_rs(xog, region),
            None => E::zero(),
        }
    }

    /// Rv of a source: its own value, else derived from the oil mass
    /// fraction in gas, else zero.
    pub fn rv_of<E, S>(&self, fs: &S, region: RegionIdx) -> E
    where
        E: Evaluation,
        S: FluidStateSource<E> + ?Sized,
    {
        if let Some(rv) = fs.rv() {
            return rv;
        }
        match fs.mass_fraction(Phase::Gas, Component::Oil) {
            Some(xgo) => self.convert_xgo_to_rv(xgo, region),
            None => E::zero(),
        }
    }

    /// `1/B` of a source: its own value, else evaluated here. Inactive
    /// phases without a value get zero.
    pub fn inv_b_of<E, S>(&self, fs: &S, phase: Phase, region: RegionIdx) -> E
    where
        E: Evaluation,
        S: FluidStateSource<E> + ?Sized,
    {
        if let Some(inv_b) = fs.inv_b(phase) {
            return inv_b;
        }
        if !self.phase_is_active(phase) {
            return E::zero();
        }
        self.inverse_formation_volume_factor(fs, phase, region)
    }

    fn oil_is_saturated<E, S>(&self, fs: &S, region: RegionIdx, t: E, p: E, rs: E) -> bool
    where
        E: Evaluation,
        S: FluidStateSource<E> + ?Sized,
    {
        if !self.phase_is_active(Phase::Gas) || fs.saturation(Phase::Gas).value() <= 0.0 {
            return false;
        }
        let rs_sat = self
            .oil
            .saturated_gas_dissolution_factor(region, t.value(), p.value());
        rs.value() >= SATURATED_FRACTION * rs_sat
    }

    fn gas_is_saturated<E, S>(&self, fs: &S, region: RegionIdx, t: E, p: E, rv: E) -> bool
    where
        E: Evaluation,
        S: FluidStateSource<E> + ?Sized,
    {
        if !self.phase_is_active(Phase::Oil) || fs.saturation(Phase::Oil).value() <= 0.0 {
            return false;
        }
        let rv_sat = self
            .gas
            .saturated_oil_vaporization_factor(region, t.value(), p.value());
        rv.value() >= SATURATED_FRACTION * rv_sat
    }
}
