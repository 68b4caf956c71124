//! Read access to any fluid state, indexed canonically.

use bo_core::{Component, Evaluation, Phase, RegionIdx};

/// A fluid state that `assign` can copy from.
///
/// The required methods are the common thermodynamic quantities. Black-oil
/// specific quantities are optional: a source that cannot provide them
/// returns `None` and the fluid system derives them instead.
pub trait FluidStateSource<E: Evaluation> {
    fn pressure(&self, phase: Phase) -> E;

    fn saturation(&self, phase: Phase) -> E;

    fn density(&self, phase: Phase) -> E;

    fn temperature(&self, phase: Phase) -> E;

    fn enthalpy(&self, phase: Phase) -> E;

    fn pvt_region_index(&self) -> Option<RegionIdx> {
        None
    }

    fn rs(&self) -> Option<E> {
        None
    }

    fn rv(&self) -> Option<E> {
        None
    }

    fn inv_b(&self, _phase: Phase) -> Option<E> {
        None
    }

    /// Mass fraction of `component` in `phase`.
    fn mass_fraction(&self, _phase: Phase, _component: Component) -> Option<E> {
        None
    }
}

/// Plain canonically indexed state with public fields.
///
/// Carries no black-oil quantities except optional mass fractions, so the
/// fluid system fills in Rs, Rv and `1/B` when it is assigned from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleFluidState<E> {
    pub pressure: [E; Phase::COUNT],
    pub saturation: [E; Phase::COUNT],
    pub density: [E; Phase::COUNT],
    pub temperature: E,
    pub enthalpy: [E; Phase::COUNT],
    /// `mass_fractions[phase][component]`
    pub mass_fractions: Option<[[E; Component::COUNT]; Phase::COUNT]>,
}

impl<E: Evaluation> SimpleFluidState<E> {
    /// State at uniform pressure and temperature with the given saturations.
    pub fn new(pressure: E, temperature: E, saturation: [E; Phase::COUNT]) -> Self {
        Self {
            pressure: [pressure; Phase::COUNT],
            saturation,
            density: [E::zero(); Phase::COUNT],
            temperature,
            enthalpy: [E::zero(); Phase::COUNT],
            mass_fractions: None,
        }
    }
}

impl<E: Evaluation> FluidStateSource<E> for SimpleFluidState<E> {
    fn pressure(&self, phase: Phase) -> E {
        self.pressure[phase.index()]
    }

    fn saturation(&self, phase: Phase) -> E {
        self.saturation[phase.index()]
    }

    fn density(&self, phase: Phase) -> E {
        self.density[phase.index()]
    }

    fn temperature(&self, _phase: Phase) -> E {
        self.temperature
    }

    fn enthalpy(&self, phase: Phase) -> E {
        self.enthalpy[phase.index()]
    }

    fn mass_fraction(&self, phase: Phase, component: Component) -> Option<E> {
        self.mass_fractions
            .map(|x| x[phase.index()][component.index()])
    }
}
