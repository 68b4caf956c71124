//! Serializable PVT table records.
//!
//! A [`PvtTableSet`] is the input contract of the PVT layer: per-region
//! tables for every phase plus surface densities, in one unit system.
//! Deck parsing lives outside this workspace; records are read from JSON.
//!
//! ```json
//! {
//!   "units": "metric",
//!   "densities": [{ "oil": 786.5, "water": 1037.8, "gas": 0.97 }],
//!   "oil":   { "model": "dead_oil", "regions": [{ "pressure": [..], "fvf": [..], "viscosity": [..] }] },
//!   "gas":   { "model": "dry_gas",  "regions": [ .. ] },
//!   "water": { "model": "constant_compressibility", "regions": [ .. ] }
//! }
//! ```

use bo_core::UnitSystem;
use serde::{Deserialize, Serialize};

use crate::correlation::ConstantCompressibilityRecord;
use crate::error::{PvtError, PvtResult};
use crate::gas::{DryGasPvt, GasPvtMultiplexer, WetGasPvt};
use crate::model::VaporizationControl;
use crate::oil::{ConstantCompressibilityOilPvt, DeadOilPvt, LiveOilPvt, OilPvtMultiplexer};
use crate::water::{ConstantCompressibilityWaterPvt, WaterPvtMultiplexer};

/// Pressure-indexed FVF/viscosity table without dissolution (PVDO, PVDG).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadTableRecord {
    pub pressure: Vec<f64>,
    pub fvf: Vec<f64>,
    pub viscosity: Vec<f64>,
}

/// One sampling point of a live-oil row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PvtPoint {
    pub pressure: f64,
    pub fvf: f64,
    pub viscosity: f64,
}

/// Live-oil row at fixed Rs: saturated point first, then undersaturated
/// points at increasing pressure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PvtoRow {
    pub rs: f64,
    pub points: Vec<PvtPoint>,
}

/// Live-oil table (PVTO) of one region, rows ordered by increasing Rs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveOilTable {
    pub rows: Vec<PvtoRow>,
}

/// One sampling point of a wet-gas row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioPoint {
    pub ratio: f64,
    pub fvf: f64,
    pub viscosity: f64,
}

/// Wet-gas row at fixed pressure: saturated Rv first, then undersaturated
/// points at decreasing Rv.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PvtgRow {
    pub pressure: f64,
    pub points: Vec<RatioPoint>,
}

/// Wet-gas table (PVTG) of one region, rows ordered by increasing pressure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WetGasTable {
    pub rows: Vec<PvtgRow>,
}

/// Surface densities of one region [kg/m³].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityRecord {
    pub oil: f64,
    pub water: f64,
    pub gas: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum OilRecord {
    LiveOil { regions: Vec<LiveOilTable> },
    DeadOil { regions: Vec<DeadTableRecord> },
    ConstantCompressibility { regions: Vec<ConstantCompressibilityRecord> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum GasRecord {
    WetGas { regions: Vec<WetGasTable> },
    DryGas { regions: Vec<DeadTableRecord> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum WaterRecord {
    ConstantCompressibility { regions: Vec<ConstantCompressibilityRecord> },
}

/// Complete PVT input: all phases of all regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PvtTableSet {
    #[serde(default)]
    pub units: UnitSystem,
    /// One entry per PVT region; defines the region count.
    pub densities: Vec<DensityRecord>,
    /// Reservoir temperature per region. Empty means surface temperature everywhere.
    #[serde(default)]
    pub reservoir_temperature: Vec<f64>,
    #[serde(default)]
    pub oil: Option<OilRecord>,
    #[serde(default)]
    pub gas: Option<GasRecord>,
    #[serde(default)]
    pub water: Option<WaterRecord>,
    /// VAPPARS item 1: vaporization-control exponent for Rv. Zero disables it.
    #[serde(default)]
    pub vap1: f64,
    /// VAPPARS item 2: vaporization-control exponent for Rs. Zero disables it.
    #[serde(default)]
    pub vap2: f64,
}

impl PvtTableSet {
    pub fn from_json_str(s: &str) -> PvtResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json_string(&self) -> PvtResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn num_regions(&self) -> usize {
        self.densities.len()
    }

    /// Copy of the table set with every value converted to SI.
    pub fn to_si(&self) -> Self {
        let u = self.units;
        Self {
            units: UnitSystem::Si,
            densities: self
                .densities
                .iter()
                .map(|d| DensityRecord {
                    oil: u.density_to_si(d.oil),
                    water: u.density_to_si(d.water),
                    gas: u.density_to_si(d.gas),
                })
                .collect(),
            reservoir_temperature: self
                .reservoir_temperature
                .iter()
                .map(|&t| u.temperature_to_si(t))
                .collect(),
            oil: self.oil.as_ref().map(|r| r.to_si(u)),
            gas: self.gas.as_ref().map(|r| r.to_si(u)),
            water: self.water.as_ref().map(|r| r.to_si(u)),
            vap1: self.vap1,
            vap2: self.vap2,
        }
    }

    /// Control applied to the saturated Rs of live oil.
    pub fn oil_vaporization_control(&self) -> VaporizationControl {
        VaporizationControl::new(self.vap2)
    }

    /// Control applied to the saturated Rv of wet gas.
    pub fn gas_vaporization_control(&self) -> VaporizationControl {
        VaporizationControl::new(self.vap1)
    }

    /// Oil multiplexer for the oil record, `None` without oil data.
    pub fn build_oil(&self) -> PvtResult<Option<OilPvtMultiplexer>> {
        let Some(record) = &self.oil else {
            return Ok(None);
        };
        let record = record.to_si(self.units);
        self.check_regions("oil PVT", record.num_regions())?;
        let model = match &record {
            OilRecord::LiveOil { regions } => OilPvtMultiplexer::from(
                LiveOilPvt::new(regions)?.with_vaporization_control(self.oil_vaporization_control()),
            ),
            OilRecord::DeadOil { regions } => DeadOilPvt::new(regions)?.into(),
            OilRecord::ConstantCompressibility { regions } => {
                ConstantCompressibilityOilPvt::new(regions)?.into()
            }
        };
        Ok(Some(model))
    }

    /// Gas multiplexer for the gas record, `None` without gas data.
    pub fn build_gas(&self) -> PvtResult<Option<GasPvtMultiplexer>> {
        let Some(record) = &self.gas else {
            return Ok(None);
        };
        let record = record.to_si(self.units);
        self.check_regions("gas PVT", record.num_regions())?;
        let model = match &record {
            GasRecord::WetGas { regions } => GasPvtMultiplexer::from(
                WetGasPvt::new(regions)?.with_vaporization_control(self.gas_vaporization_control()),
            ),
            GasRecord::DryGas { regions } => DryGasPvt::new(regions)?.into(),
        };
        Ok(Some(model))
    }

    /// Water multiplexer for the water record, `None` without water data.
    pub fn build_water(&self) -> PvtResult<Option<WaterPvtMultiplexer>> {
        let Some(record) = &self.water else {
            return Ok(None);
        };
        let record = record.to_si(self.units);
        self.check_regions("water PVT", record.num_regions())?;
        let model = match &record {
            WaterRecord::ConstantCompressibility { regions } => {
                ConstantCompressibilityWaterPvt::new(regions)?.into()
            }
        };
        Ok(Some(model))
    }

    fn check_regions(&self, what: &'static str, got: usize) -> PvtResult<()> {
        if got != self.num_regions() {
            return Err(PvtError::RegionCountMismatch {
                what,
                expected: self.num_regions(),
                got,
            });
        }
        Ok(())
    }
}

impl OilRecord {
    pub fn num_regions(&self) -> usize {
        match self {
            OilRecord::LiveOil { regions } => regions.len(),
            OilRecord::DeadOil { regions } => regions.len(),
            OilRecord::ConstantCompressibility { regions } => regions.len(),
        }
    }

    fn to_si(&self, u: UnitSystem) -> Self {
        match self {
            OilRecord::LiveOil { regions } => OilRecord::LiveOil {
                regions: regions
                    .iter()
                    .map(|t| LiveOilTable {
                        rows: t
                            .rows
                            .iter()
                            .map(|row| PvtoRow {
                                rs: u.gas_oil_ratio_to_si(row.rs),
                                points: row
                                    .points
                                    .iter()
                                    .map(|pt| PvtPoint {
                                        pressure: u.pressure_to_si(pt.pressure),
                                        fvf: pt.fvf,
                                        viscosity: u.viscosity_to_si(pt.viscosity),
                                    })
                                    .collect(),
                            })
                            .collect(),
                    })
                    .collect(),
            },
            OilRecord::DeadOil { regions } => OilRecord::DeadOil {
                regions: regions.iter().map(|t| t.to_si(u, |b| b)).collect(),
            },
            OilRecord::ConstantCompressibility { regions } => OilRecord::ConstantCompressibility {
                regions: regions.iter().map(|r| constant_to_si(r, u)).collect(),
            },
        }
    }
}

impl GasRecord {
    pub fn num_regions(&self) -> usize {
        match self {
            GasRecord::WetGas { regions } => regions.len(),
            GasRecord::DryGas { regions } => regions.len(),
        }
    }

    fn to_si(&self, u: UnitSystem) -> Self {
        match self {
            GasRecord::WetGas { regions } => GasRecord::WetGas {
                regions: regions
                    .iter()
                    .map(|t| WetGasTable {
                        rows: t
                            .rows
                            .iter()
                            .map(|row| PvtgRow {
                                pressure: u.pressure_to_si(row.pressure),
                                points: row
                                    .points
                                    .iter()
                                    .map(|pt| RatioPoint {
                                        ratio: u.oil_gas_ratio_to_si(pt.ratio),
                                        fvf: u.gas_fvf_to_si(pt.fvf),
                                        viscosity: u.viscosity_to_si(pt.viscosity),
                                    })
                                    .collect(),
                            })
                            .collect(),
                    })
                    .collect(),
            },
            GasRecord::DryGas { regions } => GasRecord::DryGas {
                regions: regions
                    .iter()
                    .map(|t| t.to_si(u, |b| u.gas_fvf_to_si(b)))
                    .collect(),
            },
        }
    }
}

impl WaterRecord {
    pub fn num_regions(&self) -> usize {
        match self {
            WaterRecord::ConstantCompressibility { regions } => regions.len(),
        }
    }

    fn to_si(&self, u: UnitSystem) -> Self {
        match self {
            WaterRecord::ConstantCompressibility { regions } => {
                WaterRecord::ConstantCompressibility {
                    regions: regions.iter().map(|r| constant_to_si(r, u)).collect(),
                }
            }
        }
    }
}

impl DeadTableRecord {
    fn to_si(&self, u: UnitSystem, fvf: impl Fn(f64) -> f64) -> Self {
        Self {
            pressure: self.pressure.iter().map(|&p| u.pressure_to_si(p)).collect(),
            fvf: self.fvf.iter().map(|&b| fvf(b)).collect(),
            viscosity: self
                .viscosity
                .iter()
                .map(|&mu| u.viscosity_to_si(mu))
                .collect(),
        }
    }
}

fn constant_to_si(r: &ConstantCompressibilityRecord, u: UnitSystem) -> ConstantCompressibilityRecord {
    ConstantCompressibilityRecord {
        reference_pressure: u.pressure_to_si(r.reference_pressure),
        reference_fvf: r.reference_fvf,
        compressibility: u.compressibility_to_si(r.compressibility),
        reference_viscosity: u.viscosity_to_si(r.reference_viscosity),
        viscosibility: u.compressibility_to_si(r.viscosibility),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PvtModel;

    const DEAD: &str = r#"{
        "units": "metric",
        "densities": [{ "oil": 800.0, "water": 1000.0, "gas": 0.9 }],
        "oil": {
            "model": "dead_oil",
            "regions": [{ "pressure": [10.0, 100.0, 400.0], "fvf": [1.10, 1.08, 1.05], "viscosity": [1.2, 1.3, 1.5] }]
        },
        "water": {
            "model": "constant_compressibility",
            "regions": [{ "reference_pressure": 200.0, "reference_fvf": 1.01, "compressibility": 4.5e-5,
                          "reference_viscosity": 0.5 }]
        }
    }"#;

    #[test]
    fn parses_and_converts_metric() {
        let set = PvtTableSet::from_json_str(DEAD).unwrap();
        assert_eq!(set.num_regions(), 1);
        assert!(set.gas.is_none());

        let si = set.to_si();
        assert_eq!(si.units, UnitSystem::Si);
        let Some(OilRecord::DeadOil { regions }) = &si.oil else {
            panic!("expected dead oil");
        };
        assert!((regions[0].pressure[1] - 100.0e5).abs() < 1e-6);
        assert!((regions[0].viscosity[0] - 1.2e-3).abs() < 1e-15);
    }

    #[test]
    fn builds_multiplexers() {
        let set = PvtTableSet::from_json_str(DEAD).unwrap();
        let oil = set.build_oil().unwrap().unwrap();
        assert_eq!(oil.name(), "DeadOil");
        assert!(set.build_gas().unwrap().is_none());
        let water = set.build_water().unwrap().unwrap();
        assert_eq!(water.num_regions(), 1);
    }

    #[test]
    fn region_count_must_match_densities() {
        let mut set = PvtTableSet::from_json_str(DEAD).unwrap();
        set.densities.push(set.densities[0]);
        assert!(matches!(
            set.build_oil(),
            Err(PvtError::RegionCountMismatch {
                expected: 2,
                got: 1,
                ..
            })
        ));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = PvtTableSet::from_json_str(r#"{ "densities": [], "bogus": 1 }"#).unwrap_err();
        assert!(matches!(err, PvtError::Input { .. }));
    }

    #[test]
    fn json_round_trip_preserves_records() {
        let set = PvtTableSet::from_json_str(DEAD).unwrap();
        let text = set.to_json_string().unwrap();
        assert_eq!(PvtTableSet::from_json_str(&text).unwrap(), set);
    }
}
