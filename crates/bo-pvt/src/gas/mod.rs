//! Gas-phase PVT models and their multiplexer.

mod dry_gas;
mod wet_gas;

pub use dry_gas::DryGasPvt;
pub use wet_gas::WetGasPvt;

use bo_core::{Evaluation, RegionIdx};

use crate::error::{PvtError, PvtResult};
use crate::model::{GasPvt, PvtModel, uninitialized};

/// Gas PVT approach tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GasPvtApproach {
    DryGas,
    WetGas,
}

/// Closed set of gas PVT models selected at setup time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GasPvtMultiplexer {
    #[default]
    Uninitialized,
    DryGas(DryGasPvt),
    WetGas(WetGasPvt),
}

macro_rules! dispatch {
    ($self:expr, $pvt:ident => $body:expr) => {
        match $self {
            GasPvtMultiplexer::DryGas($pvt) => $body,
            GasPvtMultiplexer::WetGas($pvt) => $body,
            GasPvtMultiplexer::Uninitialized => uninitialized("gas"),
        }
    };
}

impl GasPvtMultiplexer {
    pub fn approach(&self) -> Option<GasPvtApproach> {
        match self {
            GasPvtMultiplexer::Uninitialized => None,
            GasPvtMultiplexer::DryGas(_) => Some(GasPvtApproach::DryGas),
            GasPvtMultiplexer::WetGas(_) => Some(GasPvtApproach::WetGas),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.approach().is_some()
    }

    pub fn initialize(&mut self, model: impl Into<GasPvtMultiplexer>) -> PvtResult<()> {
        if self.is_initialized() {
            return Err(PvtError::AlreadyInitialized { what: "gas" });
        }
        let model = model.into();
        if !model.is_initialized() {
            return Err(PvtError::InvalidArg {
                what: "gas PVT multiplexer initialized without a model",
            });
        }
        *self = model;
        Ok(())
    }
}

impl From<DryGasPvt> for GasPvtMultiplexer {
    fn from(pvt: DryGasPvt) -> Self {
        GasPvtMultiplexer::DryGas(pvt)
    }
}

impl From<WetGasPvt> for GasPvtMultiplexer {
    fn from(pvt: WetGasPvt) -> Self {
        GasPvtMultiplexer::WetGas(pvt)
    }
}

impl PvtModel for GasPvtMultiplexer {
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
        rv: E,
    ) -> E {
        dispatch!(self, pvt => pvt.inverse_formation_volume_factor(region, temperature, pressure, rv))
    }

    fn viscosity<E: Evaluation>(&self, region: RegionIdx, temperature: E, pressure: E, rv: E) -> E {
        dispatch!(self, pvt => pvt.viscosity(region, temperature, pressure, rv))
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

    fn saturation_pressure<E: Evaluation>(&self, region: RegionIdx, temperature: E, rv: E) -> E {
        dispatch!(self, pvt => pvt.saturation_pressure(region, temperature, rv))
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

impl GasPvt for GasPvtMultiplexer {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::DeadTableRecord;

    fn dry() -> DryGasPvt {
        DryGasPvt::new(&[DeadTableRecord {
            pressure: vec![1.0e6, 3.0e7],
            fvf: vec![0.12, 0.0045],
            viscosity: vec![1.2e-5, 2.2e-5],
        }])
        .unwrap()
    }

    #[test]
    fn dispatches_and_rejects_second_model() {
        let mut gas = GasPvtMultiplexer::default();
        gas.initialize(dry()).unwrap();
        assert_eq!(gas.approach(), Some(GasPvtApproach::DryGas));
        assert_eq!(gas.name(), "DryGas");
        assert_eq!(
            gas.viscosity(0, 300.0, 2.0e7, 0.0),
            dry().viscosity(0, 300.0, 2.0e7, 0.0)
        );
        assert!(matches!(
            gas.initialize(dry()),
            Err(PvtError::AlreadyInitialized { .. })
        ));
    }

    #[test]
    fn default_cannot_initialize_with_default() {
        let mut gas = GasPvtMultiplexer::default();
        assert!(matches!(
            gas.initialize(GasPvtMultiplexer::Uninitialized),
            Err(PvtError::InvalidArg { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "gas PVT multiplexer")]
    fn query_before_initialization_panics() {
        let gas = GasPvtMultiplexer::default();
        let _ = gas.saturated_oil_vaporization_factor(0, 300.0, 2.0e7);
    }
}
