//! Oil-phase PVT models and their multiplexer.

mod constant_compressibility;
mod dead_oil;
mod live_oil;

pub use constant_compressibility::ConstantCompressibilityOilPvt;
pub(crate) use dead_oil::dead_region;
pub use dead_oil::DeadOilPvt;
pub use live_oil::LiveOilPvt;

use bo_core::{Evaluation, RegionIdx};

use crate::error::{PvtError, PvtResult};
use crate::model::{OilPvt, PvtModel, uninitialized};

/// Oil PVT approach tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OilPvtApproach {
    LiveOil,
    DeadOil,
    ConstantCompressibilityOil,
}

/// Closed set of oil PVT models selected at setup time.
///
/// Starts `Uninitialized`; [`OilPvtMultiplexer::initialize`] moves it to an
/// active approach exactly once. Queries on an uninitialized multiplexer panic.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OilPvtMultiplexer {
    #[default]
    Uninitialized,
    LiveOil(LiveOilPvt),
    DeadOil(DeadOilPvt),
    ConstantCompressibilityOil(ConstantCompressibilityOilPvt),
}

macro_rules! dispatch {
    ($self:expr, $pvt:ident => $body:expr) => {
        match $self {
            OilPvtMultiplexer::LiveOil($pvt) => $body,
            OilPvtMultiplexer::DeadOil($pvt) => $body,
            OilPvtMultiplexer::ConstantCompressibilityOil($pvt) => $body,
            OilPvtMultiplexer::Uninitialized => uninitialized("oil"),
        }
    };
}

impl OilPvtMultiplexer {
    pub fn approach(&self) -> Option<OilPvtApproach> {
        match self {
            OilPvtMultiplexer::Uninitialized => None,
            OilPvtMultiplexer::LiveOil(_) => Some(OilPvtApproach::LiveOil),
            OilPvtMultiplexer::DeadOil(_) => Some(OilPvtApproach::DeadOil),
            OilPvtMultiplexer::ConstantCompressibilityOil(_) => {
                Some(OilPvtApproach::ConstantCompressibilityOil)
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.approach().is_some()
    }

    /// Select the active model. Fails if a model is already selected.
    pub fn initialize(&mut self, model: impl Into<OilPvtMultiplexer>) -> PvtResult<()> {
        if self.is_initialized() {
            return Err(PvtError::AlreadyInitialized { what: "oil" });
        }
        let model = model.into();
        if !model.is_initialized() {
            return Err(PvtError::InvalidArg {
                what: "oil PVT multiplexer initialized without a model",
            });
        }
        *self = model;
        Ok(())
    }
}

impl From<LiveOilPvt> for OilPvtMultiplexer {
    fn from(pvt: LiveOilPvt) -> Self {
        OilPvtMultiplexer::LiveOil(pvt)
    }
}

impl From<DeadOilPvt> for OilPvtMultiplexer {
    fn from(pvt: DeadOilPvt) -> Self {
        OilPvtMultiplexer::DeadOil(pvt)
    }
}

impl From<ConstantCompressibilityOilPvt> for OilPvtMultiplexer {
    fn from(pvt: ConstantCompressibilityOilPvt) -> Self {
        OilPvtMultiplexer::ConstantCompressibilityOil(pvt)
    }
}

impl PvtModel for OilPvtMultiplexer {
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
        rs: E,
    ) -> E {
        dispatch!(self, pvt => pvt.inverse_formation_volume_factor(region, temperature, pressure, rs))
    }

    fn viscosity<E: Evaluation>(&self, region: RegionIdx, temperature: E, pressure: E, rs: E) -> E {
        dispatch!(self, pvt => pvt.viscosity(region, temperature, pressure, rs))
    }

    fn saturated_dissolution_factor<E: Evaluation>(
        &self,
        region: RegionIdx,
        temperature: E,
        pressure: E,
    ) -> E {
        dispatch!(self, pvt => pvt.saturated_dissolution_factor(region, temperature, pressure))
    }

    fn saturated_dissolution_factor_with_saturation<E: Evaluation>(
        &self,
        region: RegionIdx,
        temperature: E,
        pressure: E,
        saturation: E,
        max_saturation: E,
    ) -> E {
        dispatch!(self, pvt => pvt.saturated_dissolution_factor_with_saturation(
            region,
            temperature,
            pressure,
            saturation,
            max_saturation,
        ))
    }

    fn saturation_pressure<E: Evaluation>(&self, region: RegionIdx, temperature: E, rs: E) -> E {
        dispatch!(self, pvt => pvt.saturation_pressure(region, temperature, rs))
    }

    fn saturated_inverse_formation_volume_factor<E: Evaluation>(
        &self,
        region: RegionIdx,
        temperature: E,
        pressure: E,
    ) -> E {
        dispatch!(self, pvt => pvt.saturated_inverse_formation_volume_factor(region, temperature, pressure))
    }

    fn saturated_viscosity<E: Evaluation>(&self, region: RegionIdx, temperature: E, pressure: E) -> E {
        dispatch!(self, pvt => pvt.saturated_viscosity(region, temperature, pressure))
    }
}

impl OilPvt for OilPvtMultiplexer {}
