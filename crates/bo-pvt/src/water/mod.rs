//! Water-phase PVT models and their multiplexer.

mod constant_compressibility;

pub use constant_compressibility::ConstantCompressibilityWaterPvt;

use bo_core::{Evaluation, RegionIdx};

use crate::error::{PvtError, PvtResult};
use crate::model::{PvtModel, WaterPvt, uninitialized};

/// Water PVT approach tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaterPvtApproach {
    ConstantCompressibilityWater,
}

/// Closed set of water PVT models selected at setup time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WaterPvtMultiplexer {
    #[default]
    Uninitialized,
    ConstantCompressibilityWater(ConstantCompressibilityWaterPvt),
}

macro_rules! dispatch {
    ($self:expr, $pvt:ident => $body:expr) => {
        match $self {
            WaterPvtMultiplexer::ConstantCompressibilityWater($pvt) => $body,
            WaterPvtMultiplexer::Uninitialized => uninitialized("water"),
        }
    };
}

impl WaterPvtMultiplexer {
    pub fn approach(&self) -> Option<WaterPvtApproach> {
        match self {
            WaterPvtMultiplexer::Uninitialized => None,
            WaterPvtMultiplexer::ConstantCompressibilityWater(_) => {
                Some(WaterPvtApproach::ConstantCompressibilityWater)
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.approach().is_some()
    }

    pub fn initialize(&mut self, model: impl Into<WaterPvtMultiplexer>) -> PvtResult<()> {
        if self.is_initialized() {
            return Err(PvtError::AlreadyInitialized { what: "water" });
        }
        let model = model.into();
        if !model.is_initialized() {
            return Err(PvtError::InvalidArg {
                what: "water PVT multiplexer initialized without a model",
            });
        }
        *self = model;
        Ok(())
    }
}

impl From<ConstantCompressibilityWaterPvt> for WaterPvtMultiplexer {
    fn from(pvt: ConstantCompressibilityWaterPvt) -> Self {
        WaterPvtMultiplexer::ConstantCompressibilityWater(pvt)
    }
}

impl PvtModel for WaterPvtMultiplexer {
    fn name(&self) -> &'static str {
        dispatch!(self, pvt => pvt.name())
    }

    fn num_regions(&self) -> usize {
        dispatch!(self, pvt => pvt.num_regions())
    }

    fn inverse_formation_volume_factor<E: Evaluation>(
        &self,
        region: RegionIdx,
        temperature: E,
        pressure: E,
        ratio: E,
    ) -> E {
        dispatch!(self, pvt => pvt.inverse_formation_volume_factor(region, temperature, pressure, ratio))
    }

    fn viscosity<E: Evaluation>(&self, region: RegionIdx, temperature: E, pressure: E, ratio: E) -> E {
        dispatch!(self, pvt => pvt.viscosity(region, temperature, pressure, ratio))
    }

    fn saturated_dissolution_factor<E: Evaluation>(
        &self,
        region: RegionIdx,
        temperature: E,
        pressure: E,
    ) -> E {
        dispatch!(self, pvt => pvt.saturated_dissolution_factor(region, temperature, pressure))
    }

    fn saturation_pressure<E: Evaluation>(&self, region: RegionIdx, temperature: E, ratio: E) -> E {
        dispatch!(self, pvt => pvt.saturation_pressure(region, temperature, ratio))
    }
}

impl WaterPvt for WaterPvtMultiplexer {}
