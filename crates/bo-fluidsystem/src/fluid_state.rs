//! Black-oil fluid state.
//!
//! Stores the thermodynamic state of up to three phases for one PVT region.
//! Which optional quantities exist is fixed at compile time by a
//! [`FluidFeatures`] set; with `N < 3` only the active phases are stored, in
//! the slots given by the fluid system's [`crate::PhaseIndexMap`].

use core::fmt;

use bo_core::{Evaluation, Phase, RegionIdx};

use crate::conditional::{ConditionalStorage, FluidFeatures, Slot};
use crate::source::FluidStateSource;
use crate::system::BlackOilFluidSystem;

pub struct BlackOilFluidState<'a, E, F, const N: usize = 3>
where
    E: Evaluation,
    F: FluidFeatures,
{
    system: &'a BlackOilFluidSystem,
    pvt_region_index: RegionIdx,
    pressure: [E; N],
    saturation: [E; N],
    density: [E; N],
    inv_b: [E; N],
    temperature: ConditionalStorage<F::StoredTemperature, E>,
    enthalpy: ConditionalStorage<F::Energy, [E; N]>,
    rs: ConditionalStorage<F::Dissolution, E>,
    rv: ConditionalStorage<F::Dissolution, E>,
}

impl<'a, E, F, const N: usize> BlackOilFluidState<'a, E, F, N>
where
    E: Evaluation,
    F: FluidFeatures,
{
    /// Unassigned state in region 0. Every stored quantity is undefined.
    ///
    /// Panics unless `N` is 3 or the number of active phases.
    #[track_caller]
    pub fn new(system: &'a BlackOilFluidSystem) -> Self {
        assert!(
            N == Phase::COUNT || N == system.num_active_phases(),
            "fluid state stores {N} phases but the fluid system has {} active",
            system.num_active_phases()
        );
        let undefined = E::undefined();
        Self {
            system,
            pvt_region_index: 0,
            pressure: [undefined; N],
            saturation: [undefined; N],
            density: [undefined; N],
            inv_b: [undefined; N],
            temperature: Slot::new(undefined),
            enthalpy: Slot::new([undefined; N]),
            rs: Slot::new(undefined),
            rv: Slot::new(undefined),
        }
    }

    pub fn system(&self) -> &'a BlackOilFluidSystem {
        self.system
    }

    #[inline]
    fn storage_index(&self, phase: Phase) -> usize {
        if N == Phase::COUNT {
            phase.index()
        } else {
            self.system.phase_map().canonical_to_storage(phase)
        }
    }

    #[inline]
    fn canonical_phase(&self, slot: usize) -> Phase {
        if N == Phase::COUNT {
            Phase::ALL[slot]
        } else {
            self.system.phase_map().storage_to_canonical(slot)
        }
    }

    /// Overwrite the whole state from `source`.
    ///
    /// Rs, Rv and `1/B` come from the source when it has them and are
    /// derived by the fluid system otherwise. No range checks are made.
    pub fn assign<S>(&mut self, source: &S)
    where
        S: FluidStateSource<E> + ?Sized,
    {
        let system = self.system;
        if let Some(t) = self.temperature.try_get_mut() {
            *t = source.temperature(Phase::ALL[0]);
        }
        self.pvt_region_index = source.pvt_region_index().unwrap_or(0);
        let region = self.pvt_region_index;

        if let Some(rs) = self.rs.try_get_mut() {
            *rs = system.rs_of(source, region);
        }
        if let Some(rv) = self.rv.try_get_mut() {
            *rv = system.rv_of(source, region);
        }

        for slot in 0..N {
            let phase = self.canonical_phase(slot);
            self.saturation[slot] = source.saturation(phase);
            self.pressure[slot] = source.pressure(phase);
            self.density[slot] = source.density(phase);
            if let Some(h) = self.enthalpy.try_get_mut() {
                h[slot] = source.enthalpy(phase);
            }
            self.inv_b[slot] = system.inv_b_of(source, phase, region);
        }
    }

    pub fn set_pvt_region_index(&mut self, region: RegionIdx) {
        self.pvt_region_index = region;
    }

    pub fn set_pressure(&mut self, phase: Phase, value: E) {
        let i = self.storage_index(phase);
        self.pressure[i] = value;
    }

    pub fn set_saturation(&mut self, phase: Phase, value: E) {
        let i = self.storage_index(phase);
        self.saturation[i] = value;
    }

    pub fn set_density(&mut self, phase: Phase, value: E) {
        let i = self.storage_index(phase);
        self.density[i] = value;
    }

    pub fn set_inv_b(&mut self, phase: Phase, value: E) {
        let i = self.storage_index(phase);
        self.inv_b[i] = value;
    }

    /// Panics without the temperature or energy feature.
    #[track_caller]
    pub fn set_temperature(&mut self, value: E) {
        *self.temperature.get_mut("temperature") = value;
    }

    /// Panics without the energy feature.
    #[track_caller]
    pub fn set_enthalpy(&mut self, phase: Phase, value: E) {
        let i = self.storage_index(phase);
        self.enthalpy.get_mut("enthalpy")[i] = value;
    }

    /// Panics without the dissolution feature.
    #[track_caller]
    pub fn set_rs(&mut self, value: E) {
        *self.rs.get_mut("gas dissolution factor") = value;
    }

    /// Panics without the dissolution feature.
    #[track_caller]
    pub fn set_rv(&mut self, value: E) {
        *self.rv.get_mut("oil vaporization factor") = value;
    }

    pub fn pvt_region_index(&self) -> RegionIdx {
        self.pvt_region_index
    }

    pub fn pressure(&self, phase: Phase) -> E {
        self.pressure[self.storage_index(phase)]
    }

    pub fn saturation(&self, phase: Phase) -> E {
        self.saturation[self.storage_index(phase)]
    }

    pub fn density(&self, phase: Phase) -> E {
        self.density[self.storage_index(phase)]
    }

    pub fn inv_b(&self, phase: Phase) -> E {
        self.inv_b[self.storage_index(phase)]
    }

    /// Stored temperature, or the reservoir temperature of the state's
    /// region when temperature is not stored.
    pub fn temperature(&self, _phase: Phase) -> E {
        match self.temperature.try_get() {
            Some(&t) => t,
            None => E::constant(self.system.reservoir_temperature(self.pvt_region_index)),
        }
    }

    /// Panics without the energy feature.
    #[track_caller]
    pub fn enthalpy(&self, phase: Phase) -> E {
        self.enthalpy.get("enthalpy")[self.storage_index(phase)]
    }

    /// Zero without the dissolution feature.
    pub fn rs(&self) -> E {
        self.rs.try_get().copied().unwrap_or_else(E::zero)
    }

    /// Zero without the dissolution feature.
    pub fn rv(&self) -> E {
        self.rv.try_get().copied().unwrap_or_else(E::zero)
    }

    pub fn viscosity(&self, phase: Phase) -> E {
        self.system.viscosity(self, phase, self.pvt_region_index)
    }

    /// Specific internal energy `h - p/rho` [J/kg]. Panics without the energy feature.
    #[track_caller]
    pub fn internal_energy(&self, phase: Phase) -> E {
        self.enthalpy(phase) - self.pressure(phase) / self.density(phase)
    }

    /// Panic if an active quantity is still undefined. Does nothing in
    /// release builds.
    #[track_caller]
    pub fn check_defined(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        let defined = |value: &E, what: &str, phase: Phase| {
            assert!(!value.is_undefined(), "{what} of phase {phase} is undefined");
        };
        for slot in 0..N {
            let phase = self.canonical_phase(slot);
            if !self.system.phase_is_active(phase) {
                continue;
            }
            defined(&self.pressure[slot], "pressure", phase);
            defined(&self.saturation[slot], "saturation", phase);
            defined(&self.density[slot], "density", phase);
            defined(&self.inv_b[slot], "inverse formation volume factor", phase);
            if let Some(h) = self.enthalpy.try_get() {
                defined(&h[slot], "enthalpy", phase);
            }
        }
        if let Some(t) = self.temperature.try_get() {
            assert!(!t.is_undefined(), "temperature is undefined");
        }
        if let Some(rs) = self.rs.try_get() {
            assert!(!rs.is_undefined(), "gas dissolution factor is undefined");
        }
        if let Some(rv) = self.rv.try_get() {
            assert!(!rv.is_undefined(), "oil vaporization factor is undefined");
        }
    }
}

impl<E, F, const N: usize> Clone for BlackOilFluidState<'_, E, F, N>
where
    E: Evaluation,
    F: FluidFeatures,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, F, const N: usize> Copy for BlackOilFluidState<'_, E, F, N>
where
    E: Evaluation,
    F: FluidFeatures,
{
}

impl<E, F, const N: usize> fmt::Debug for BlackOilFluidState<'_, E, F, N>
where
    E: Evaluation,
    F: FluidFeatures,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlackOilFluidState")
            .field("pvt_region_index", &self.pvt_region_index)
            .field("pressure", &self.pressure)
            .field("saturation", &self.saturation)
            .field("density", &self.density)
            .field("inv_b", &self.inv_b)
            .field("temperature", &self.temperature)
            .field("enthalpy", &self.enthalpy)
            .field("rs", &self.rs)
            .field("rv", &self.rv)
            .finish()
    }
}

impl<E, F, const N: usize> FluidStateSource<E> for BlackOilFluidState<'_, E, F, N>
where
    E: Evaluation,
    F: FluidFeatures,
{
    fn pressure(&self, phase: Phase) -> E {
        BlackOilFluidState::pressure(self, phase)
    }

    fn saturation(&self, phase: Phase) -> E {
        BlackOilFluidState::saturation(self, phase)
    }

    fn density(&self, phase: Phase) -> E {
        BlackOilFluidState::density(self, phase)
    }

    fn temperature(&self, phase: Phase) -> E {
        BlackOilFluidState::temperature(self, phase)
    }

    fn enthalpy(&self, phase: Phase) -> E {
        BlackOilFluidState::enthalpy(self, phase)
    }

    fn pvt_region_index(&self) -> Option<RegionIdx> {
        Some(self.pvt_region_index)
    }

    fn rs(&self) -> Option<E> {
        Some(BlackOilFluidState::rs(self))
    }

    fn rv(&self) -> Option<E> {
        Some(BlackOilFluidState::rv(self))
    }

    fn inv_b(&self, phase: Phase) -> Option<E> {
        Some(BlackOilFluidState::inv_b(self, phase))
    }
}
