use bo_core::{Evaluation, RegionIdx};

use crate::error::{PvtError, PvtResult};
use crate::model::{GasPvt, PvtModel, region_data};
use crate::oil::dead_region;
use crate::records::DeadTableRecord;
use crate::tabulated::Tabulated1D;

#[derive(Debug, Clone, PartialEq)]
struct DryGasRegion {
    inv_b: Tabulated1D,
    inv_b_mu: Tabulated1D,
}

/// Gas without vaporized oil (PVDG).
#[derive(Debug, Clone, PartialEq)]
pub struct DryGasPvt {
    regions: Vec<DryGasRegion>,
}

impl DryGasPvt {
    pub fn new(tables: &[DeadTableRecord]) -> PvtResult<Self> {
        if tables.is_empty() {
            return Err(PvtError::InvalidArg {
                what: "dry gas needs at least one PVT region",
            });
        }
        let regions = tables
            .iter()
            .enumerate()
            .map(|(region, t)| {
                dead_region(region, t, "PVDG")
                    .map(|(inv_b, inv_b_mu)| DryGasRegion { inv_b, inv_b_mu })
            })
            .collect::<PvtResult<Vec<_>>>()?;
        Ok(Self { regions })
    }

    fn region(&self, region: RegionIdx) -> &DryGasRegion {
        region_data(&self.regions, region, "DryGas")
    }
}

impl PvtModel for DryGasPvt {
    fn name(&self) -> &'static str {
        "DryGas"
    }

    fn num_regions(&self) -> usize {
        self.regions.len()
    }

    fn inverse_formation_volume_factor<E: Evaluation>(
        &self,
        region: RegionIdx,
        _temperature: E,
        pressure: E,
        _rv: E,
    ) -> E {
        self.region(region).inv_b.eval(pressure)
    }

    fn viscosity<E: Evaluation>(&self, region: RegionIdx, _temperature: E, pressure: E, _rv: E) -> E {
        let r = self.region(region);
        r.inv_b.eval(pressure) / r.inv_b_mu.eval(pressure)
    }

    fn saturated_dissolution_factor<E: Evaluation>(
        &self,
        region: RegionIdx,
        _temperature: E,
        _pressure: E,
    ) -> E {
        let _ = self.region(region);
        E::zero()
    }

    fn saturation_pressure<E: Evaluation>(&self, region: RegionIdx, _temperature: E, _rv: E) -> E {
        let _ = self.region(region);
        E::zero()
    }
}

impl GasPvt for DryGasPvt {}
