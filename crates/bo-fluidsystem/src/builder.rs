//! Incremental fluid-system builder.

use bo_core::{Phase, ensure_positive};
use bo_core::units::constants::SURFACE_TEMPERATURE_K;
use bo_pvt::{
    DensityRecord, GasPvtApproach, GasPvtMultiplexer, OilPvtApproach, OilPvtMultiplexer,
    PvtModel, PvtTableSet, WaterPvtMultiplexer,
};
use tracing::{debug, info};

use crate::error::{FluidSystemError, FluidSystemResult};
use crate::phase_map::PhaseIndexMap;
use crate::system::BlackOilFluidSystem;

/// Builder for a [`BlackOilFluidSystem`].
///
/// Setting a phase model activates the phase. Call `build()` to validate the
/// setup and freeze it.
#[derive(Debug, Default)]
pub struct FluidSystemBuilder {
    oil: OilPvtMultiplexer,
    gas: GasPvtMultiplexer,
    water: WaterPvtMultiplexer,
    active: [bool; Phase::COUNT],
    densities: Vec<DensityRecord>,
    reservoir_temperature: Vec<f64>,
    enable_dissolved_gas: Option<bool>,
    enable_vaporized_oil: Option<bool>,
    enable_energy: bool,
}

impl FluidSystemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder preloaded with every phase model of a table set, in SI.
    pub fn from_table_set(set: &PvtTableSet) -> FluidSystemResult<Self> {
        let mut builder = Self::new();
        if let Some(oil) = set.build_oil()? {
            builder.set_oil_pvt(oil)?;
        }
        if let Some(gas) = set.build_gas()? {
            builder.set_gas_pvt(gas)?;
        }
        if let Some(water) = set.build_water()? {
            builder.set_water_pvt(water)?;
        }
        let si = set.to_si();
        builder.set_reference_densities(si.densities);
        builder.set_reservoir_temperature(si.reservoir_temperature);
        Ok(builder)
    }

    /// Install the oil model and activate the oil phase.
    pub fn set_oil_pvt(&mut self, model: impl Into<OilPvtMultiplexer>) -> FluidSystemResult<()> {
        self.oil.initialize(model)?;
        self.active[Phase::Oil.index()] = true;
        Ok(())
    }

    /// Install the gas model and activate the gas phase.
    pub fn set_gas_pvt(&mut self, model: impl Into<GasPvtMultiplexer>) -> FluidSystemResult<()> {
        self.gas.initialize(model)?;
        self.active[Phase::Gas.index()] = true;
        Ok(())
    }

    /// Install the water model and activate the water phase.
    pub fn set_water_pvt(
        &mut self,
        model: impl Into<WaterPvtMultiplexer>,
    ) -> FluidSystemResult<()> {
        self.water.initialize(model)?;
        self.active[Phase::Water.index()] = true;
        Ok(())
    }

    /// Surface densities, one record per PVT region [kg/m³].
    pub fn set_reference_densities(&mut self, densities: Vec<DensityRecord>) {
        self.densities = densities;
    }

    /// Reservoir temperature per region [K]. Empty means surface temperature.
    pub fn set_reservoir_temperature(&mut self, temperature: Vec<f64>) {
        self.reservoir_temperature = temperature;
    }

    /// Override the default, which is on for live oil with an active gas phase.
    pub fn set_enable_dissolved_gas(&mut self, enable: bool) {
        self.enable_dissolved_gas = Some(enable);
    }

    /// Override the default, which is on for wet gas with an active oil phase.
    pub fn set_enable_vaporized_oil(&mut self, enable: bool) {
        self.enable_vaporized_oil = Some(enable);
    }

    pub fn set_enable_energy(&mut self, enable: bool) {
        self.enable_energy = enable;
    }

    /// Validate and freeze the fluid system.
    pub fn build(self) -> FluidSystemResult<BlackOilFluidSystem> {
        let phase_map = PhaseIndexMap::new(self.active)?;
        let num_regions = self.densities.len();
        if num_regions == 0 {
            return Err(FluidSystemError::RegionCountMismatch {
                what: "reference densities",
                expected: 1,
                got: 0,
            });
        }

        let oil_active = phase_map.is_active(Phase::Oil);
        let gas_active = phase_map.is_active(Phase::Gas);
        if oil_active {
            check_regions("oil PVT", num_regions, self.oil.num_regions())?;
        }
        if gas_active {
            check_regions("gas PVT", num_regions, self.gas.num_regions())?;
        }
        if phase_map.is_active(Phase::Water) {
            check_regions("water PVT", num_regions, self.water.num_regions())?;
        }

        let reference_densities = self
            .densities
            .iter()
            .enumerate()
            .map(|(region, d)| {
                let mut rho = [0.0; Phase::COUNT];
                rho[Phase::Water.index()] = d.water;
                rho[Phase::Oil.index()] = d.oil;
                rho[Phase::Gas.index()] = d.gas;
                for phase in phase_map.active_phases() {
                    let value = rho[phase.index()];
                    ensure_positive(value, "reference density").map_err(|_| {
                        FluidSystemError::NonPhysical {
                            what: "reference density",
                            region,
                            value,
                        }
                    })?;
                }
                Ok(rho)
            })
            .collect::<FluidSystemResult<Vec<_>>>()?;

        let reservoir_temperature = if self.reservoir_temperature.is_empty() {
            debug!(
                temperature = SURFACE_TEMPERATURE_K,
                "no reservoir temperature given, using surface temperature"
            );
            vec![SURFACE_TEMPERATURE_K; num_regions]
        } else {
            check_regions(
                "reservoir temperature",
                num_regions,
                self.reservoir_temperature.len(),
            )?;
            for (region, &value) in self.reservoir_temperature.iter().enumerate() {
                ensure_positive(value, "reservoir temperature").map_err(|_| {
                    FluidSystemError::NonPhysical {
                        what: "reservoir temperature",
                        region,
                        value,
                    }
                })?;
            }
            self.reservoir_temperature
        };

        let both_hydrocarbons = oil_active && gas_active;
        let enable_dissolved_gas = match self.enable_dissolved_gas {
            Some(true) if !both_hydrocarbons => {
                return Err(FluidSystemError::InvalidFeature {
                    what: "dissolved gas needs active oil and gas phases",
                });
            }
            Some(enable) => enable,
            None => both_hydrocarbons && self.oil.approach() == Some(OilPvtApproach::LiveOil),
        };
        let enable_vaporized_oil = match self.enable_vaporized_oil {
            Some(true) if !both_hydrocarbons => {
                return Err(FluidSystemError::InvalidFeature {
                    what: "vaporized oil needs active oil and gas phases",
                });
            }
            Some(enable) => enable,
            None => both_hydrocarbons && self.gas.approach() == Some(GasPvtApproach::WetGas),
        };

        info!(
            phases = phase_map.num_active(),
            regions = num_regions,
            dissolved_gas = enable_dissolved_gas,
            vaporized_oil = enable_vaporized_oil,
            energy = self.enable_energy,
            "black-oil fluid system built"
        );

        Ok(BlackOilFluidSystem {
            oil: self.oil,
            gas: self.gas,
            water: self.water,
            phase_map,
            num_regions,
            enable_dissolved_gas,
            enable_vaporized_oil,
            enable_energy: self.enable_energy,
            reference_densities,
            reservoir_temperature,
        })
    }
}

fn check_regions(what: &'static str, expected: usize, got: usize) -> FluidSystemResult<()> {
    if got != expected {
        return Err(FluidSystemError::RegionCountMismatch {
            what,
            expected,
            got,
        });
    }
    Ok(())
}
