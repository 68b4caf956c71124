// bo-core/src/units.rs

use uom::si::f64::{
    DynamicViscosity as UomDynamicViscosity, MassDensity as UomMassDensity,
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
    Volume as UomVolume,
};
use uom::si::{dynamic_viscosity, mass_density, pressure, thermodynamic_temperature, volume};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type DynVisc = UomDynamicViscosity;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Volume = UomVolume;

#[inline]
pub fn pa(v: f64) -> Pressure {
    Pressure::new::<pressure::pascal>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    Pressure::new::<pressure::bar>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    Temperature::new::<thermodynamic_temperature::kelvin>(v)
}

#[inline]
pub fn centipoise(v: f64) -> DynVisc {
    DynVisc::new::<dynamic_viscosity::centipoise>(v)
}

pub mod constants {
    /// Standard surface temperature, 15.56 °C [K].
    pub const SURFACE_TEMPERATURE_K: f64 = 273.15 + 15.56;
}

/// Unit convention of tabulated input data.
///
/// `Si` data is taken as-is. `Metric` follows the usual reservoir deck
/// convention (bar, °C, cP, sm³/sm³); `Field` uses psia, °F, cP, lb/ft³,
/// Mscf/stb and rb/Mscf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UnitSystem {
    #[default]
    Si,
    Metric,
    Field,
}

impl UnitSystem {
    /// Pressure [Pa].
    pub fn pressure_to_si(self, v: f64) -> f64 {
        match self {
            UnitSystem::Si => v,
            UnitSystem::Metric => bar(v).get::<pressure::pascal>(),
            UnitSystem::Field => Pressure::new::<pressure::pound_force_per_square_inch>(v)
                .get::<pressure::pascal>(),
        }
    }

    /// Absolute temperature [K].
    pub fn temperature_to_si(self, v: f64) -> f64 {
        match self {
            UnitSystem::Si => v,
            UnitSystem::Metric => Temperature::new::<thermodynamic_temperature::degree_celsius>(v)
                .get::<thermodynamic_temperature::kelvin>(),
            UnitSystem::Field => {
                Temperature::new::<thermodynamic_temperature::degree_fahrenheit>(v)
                    .get::<thermodynamic_temperature::kelvin>()
            }
        }
    }

    /// Surface density [kg/m³].
    pub fn density_to_si(self, v: f64) -> f64 {
        match self {
            UnitSystem::Si | UnitSystem::Metric => v,
            UnitSystem::Field => Density::new::<mass_density::pound_per_cubic_foot>(v)
                .get::<mass_density::kilogram_per_cubic_meter>(),
        }
    }

    /// Dynamic viscosity [Pa·s].
    pub fn viscosity_to_si(self, v: f64) -> f64 {
        match self {
            UnitSystem::Si => v,
            UnitSystem::Metric | UnitSystem::Field => {
                centipoise(v).get::<dynamic_viscosity::pascal_second>()
            }
        }
    }

    /// Compressibility or viscosibility [1/Pa].
    pub fn compressibility_to_si(self, v: f64) -> f64 {
        v / self.pressure_to_si(1.0)
    }

    /// Dissolved gas-oil ratio Rs [sm³/sm³].
    pub fn gas_oil_ratio_to_si(self, v: f64) -> f64 {
        match self {
            UnitSystem::Si | UnitSystem::Metric => v,
            UnitSystem::Field => thousand_cubic_feet() * v / stock_tank_barrel(),
        }
    }

    /// Vaporized oil-gas ratio Rv [sm³/sm³].
    pub fn oil_gas_ratio_to_si(self, v: f64) -> f64 {
        match self {
            UnitSystem::Si | UnitSystem::Metric => v,
            UnitSystem::Field => stock_tank_barrel() * v / thousand_cubic_feet(),
        }
    }

    /// Gas formation volume factor Bg [rm³/sm³].
    pub fn gas_fvf_to_si(self, v: f64) -> f64 {
        self.oil_gas_ratio_to_si(v)
    }
}

fn thousand_cubic_feet() -> f64 {
    Volume::new::<volume::cubic_foot>(1000.0).get::<volume::cubic_meter>()
}

fn stock_tank_barrel() -> f64 {
    Volume::new::<volume::barrel>(1.0).get::<volume::cubic_meter>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{Tolerances, nearly_equal};

    const TOL: Tolerances = Tolerances {
        abs: 1e-9,
        rel: 1e-6,
    };

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _b = bar(200.0);
        let _t = k(300.0);
        let _mu = centipoise(1.0);
    }

    #[test]
    fn si_is_identity() {
        let u = UnitSystem::Si;
        assert_eq!(u.pressure_to_si(1.5e7), 1.5e7);
        assert_eq!(u.temperature_to_si(350.0), 350.0);
        assert_eq!(u.viscosity_to_si(1e-3), 1e-3);
        assert_eq!(u.gas_oil_ratio_to_si(80.0), 80.0);
    }

    #[test]
    fn metric_conversions() {
        let u = UnitSystem::Metric;
        assert!(nearly_equal(u.pressure_to_si(200.0), 200.0e5, TOL));
        assert!(nearly_equal(u.temperature_to_si(100.0), 373.15, TOL));
        assert!(nearly_equal(u.viscosity_to_si(1.0), 1e-3, TOL));
        assert!(nearly_equal(u.compressibility_to_si(4.5e-5), 4.5e-10, TOL));
    }

    #[test]
    fn field_conversions() {
        let u = UnitSystem::Field;
        assert!(nearly_equal(u.pressure_to_si(14.6959), 101_325.0, Tolerances {
            abs: 1.0,
            rel: 0.0
        }));
        assert!(nearly_equal(u.temperature_to_si(32.0), 273.15, TOL));
        // 1 Mscf/stb is about 178.1 sm3/sm3
        let rs = u.gas_oil_ratio_to_si(1.0);
        assert!((rs - 178.1).abs() < 0.1, "rs = {rs}");
        let rv = u.oil_gas_ratio_to_si(1.0);
        assert!(nearly_equal(rs * rv, 1.0, TOL));
        assert!(nearly_equal(u.density_to_si(62.4), 999.55, Tolerances {
            abs: 0.1,
            rel: 0.0
        }));
    }
}
