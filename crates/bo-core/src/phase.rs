use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Canonical black-oil fluid phase.
///
/// The discriminant is the canonical phase index: water=0, oil=1, gas=2.
/// Using the enum instead of a raw integer makes an out-of-range canonical
/// index unrepresentable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Phase {
    Water = 0,
    Oil = 1,
    Gas = 2,
}

impl Phase {
    pub const COUNT: usize = 3;

    pub const ALL: [Phase; Phase::COUNT] = [Phase::Water, Phase::Oil, Phase::Gas];

    /// Canonical index of the phase.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Phase for a canonical index, `None` if out of range.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Phase::Water),
            1 => Some(Phase::Oil),
            2 => Some(Phase::Gas),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Water => "water",
            Phase::Oil => "oil",
            Phase::Gas => "gas",
        }
    }

    /// The pseudo-component that dominates this phase.
    pub fn main_component(self) -> Component {
        match self {
            Phase::Water => Component::Water,
            Phase::Oil => Component::Oil,
            Phase::Gas => Component::Gas,
        }
    }
}

impl fmt::Debug for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Phase({})", self.name())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Black-oil pseudo-component (surface-condition fluid).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Component {
    Water = 0,
    Oil = 1,
    Gas = 2,
}

impl Component {
    pub const COUNT: usize = 3;

    pub const ALL: [Component; Component::COUNT] =
        [Component::Water, Component::Oil, Component::Gas];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Index of a PVT region. Valid values are `0..num_pvt_regions`.
pub type RegionIdx = usize;
