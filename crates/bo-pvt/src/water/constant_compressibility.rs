use bo_core::{Evaluation, RegionIdx};

use crate::correlation::ConstantCompressibilityRecord;
use crate::error::{PvtError, PvtResult};
use crate::model::{PvtModel, WaterPvt, region_data};

/// Water with constant compressibility (PVTW).
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantCompressibilityWaterPvt {
    regions: Vec<ConstantCompressibilityRecord>,
}

impl ConstantCompressibilityWaterPvt {
    pub fn new(records: &[ConstantCompressibilityRecord]) -> PvtResult<Self> {
        if records.is_empty() {
            return Err(PvtError::InvalidArg {
                what: "water needs at least one PVT region",
            });
        }
        for (region, r) in records.iter().enumerate() {
            r.validate("PVTW", region)?;
        }
        Ok(Self {
            regions: records.to_vec(),
        })
    }

    pub fn record(&self, region: RegionIdx) -> &ConstantCompressibilityRecord {
        region_data(&self.regions, region, "ConstantCompressibilityWater")
    }
}

impl PvtModel for ConstantCompressibilityWaterPvt {
    fn name(&self) -> &'static str {
        "ConstantCompressibilityWater"
    }

    fn num_regions(&self) -> usize {
        self.regions.len()
    }

    fn inverse_formation_volume_factor<E: Evaluation>(
        &self,
        region: RegionIdx,
        _temperature: E,
        pressure: E,
        _ratio: E,
    ) -> E {
        self.record(region).inverse_formation_volume_factor(pressure)
    }

    fn viscosity<E: Evaluation>(
        &self,
        region: RegionIdx,
        _temperature: E,
        pressure: E,
        _ratio: E,
    ) -> E {
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

    fn saturation_pressure<E: Evaluation>(&self, region: RegionIdx, _temperature: E, _ratio: E) -> E {
        let _ = self.record(region);
        E::zero()
    }
}

impl WaterPvt for ConstantCompressibilityWaterPvt {}
