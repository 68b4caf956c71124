//! Mapping between canonical phase indices and storage slots.
//!
//! A fluid state that stores fewer than three phases keeps the active phases
//! in consecutive slots, in canonical order. The forward table maps storage
//! slot to phase, the reverse table maps canonical index to slot.

use bo_core::Phase;

use crate::error::{FluidSystemError, FluidSystemResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseIndexMap {
    storage_to_canonical: [Phase; Phase::COUNT],
    canonical_to_storage: [Option<usize>; Phase::COUNT],
    num_active: usize,
}

impl PhaseIndexMap {
    /// Build the map from per-phase activity flags, indexed canonically.
    pub fn new(active: [bool; Phase::COUNT]) -> FluidSystemResult<Self> {
        let mut storage_to_canonical = Phase::ALL;
        let mut canonical_to_storage = [None; Phase::COUNT];
        let mut num_active = 0;

        for phase in Phase::ALL {
            if active[phase.index()] {
                storage_to_canonical[num_active] = phase;
                canonical_to_storage[phase.index()] = Some(num_active);
                num_active += 1;
            }
        }
        if num_active == 0 {
            return Err(FluidSystemError::NoActivePhase);
        }

        Ok(Self {
            storage_to_canonical,
            canonical_to_storage,
            num_active,
        })
    }

    pub fn num_active(&self) -> usize {
        self.num_active
    }

    pub fn is_active(&self, phase: Phase) -> bool {
        self.canonical_to_storage[phase.index()].is_some()
    }

    /// Active phases in canonical order.
    pub fn active_phases(&self) -> impl Iterator<Item = Phase> + '_ {
        self.storage_to_canonical[..self.num_active].iter().copied()
    }

    pub fn try_canonical_to_storage(&self, phase: Phase) -> Option<usize> {
        self.canonical_to_storage[phase.index()]
    }

    pub fn try_storage_to_canonical(&self, slot: usize) -> Option<Phase> {
        (slot < self.num_active).then(|| self.storage_to_canonical[slot])
    }

    /// Storage slot of an active phase. Panics for inactive phases.
    #[inline]
    #[track_caller]
    pub fn canonical_to_storage(&self, phase: Phase) -> usize {
        match self.canonical_to_storage[phase.index()] {
            Some(slot) => slot,
            None => panic!("phase {phase} is not active"),
        }
    }

    /// Phase stored in `slot`. Panics past the last active slot.
    #[inline]
    #[track_caller]
    pub fn storage_to_canonical(&self, slot: usize) -> Phase {
        assert!(
            slot < self.num_active,
            "storage slot {slot} out of range ({} active phases)",
            self.num_active
        );
        self.storage_to_canonical[slot]
    }
}
