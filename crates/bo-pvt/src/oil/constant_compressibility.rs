use bo_core::{Evaluation, RegionIdx};

use crate::correlation::ConstantCompressibilityRecord;
use crate::error::{PvtError, PvtResult};
use crate::model::{OilPvt, PvtModel, region_data};

/// Dead oil with constant compressibility (PVCDO).
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantCompressibilityOilPvt {
    regions: Vec<ConstantCompressibilityRecord>,
}

impl ConstantCompressibilityOilPvt {
    pub fn new(records: &[ConstantCompressibilityRecord]) -> PvtResult<Self> {
        if records.is_empty() {
            return Err(PvtError::InvalidArg {
                what: "constant compressibility oil needs at least one PVT region",
            });
        }
        for (region, r) in records.iter().enumerate() {
            r.validate("PVCDO", region)?;
        }
        Ok(Self {
            regions: records.to_vec(),
        })
    }

    pub fn record(&self, region: RegionIdx) -> &ConstantCompressibilityRecord {
        region_data(&self.regions, region, "ConstantCompressibilityOil")
    }
}

impl PvtModel for ConstantCompressibilityOilPvt {
    fn name(&self) -> &'static str {
        "ConstantCompressibilityOil"
    }

    fn num_regions(&self) -> usize {
        self.regions.len()
    }

    fn inverse_formation_volume_factor<E: Evaluation>(
        &self,
        region: RegionIdx,
        _temperature: E,
        pressure: E,
        _rs: E,
    ) -> E {
        self.record(region).inverse_formation_volume_factor(pressure)
    }

    fn viscosity<E: Evaluation>(&self, region: RegionIdx, _temperature: E, pressure: E, _rs: E) -> E {
        self.record(region).viscosity(pressure)
    }

    fn saturated_dissolution_factor<E: Evaluation>(
        &self,
        region: RegionIdx,
        _temperature: E,
        _pressure: E,
    ) -> E {
        let _ = self.record(region);
        E::zero()
    }

    fn saturation_pressure<E: Evaluation>(&self, region: RegionIdx, _temperature: E, _rs: E) -> E {
        let _ = self.record(region);
        E::zero()
    }
}

impl OilPvt for ConstantCompressibilityOilPvt {}
