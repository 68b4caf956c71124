//! End-to-end model scenarios built from table records.

use bo_pvt::{
    GasPvt, LiveOilPvt, LiveOilTable, OilPvt, PvtModel, PvtPoint, PvtTableSet, PvtoRow, WaterPvt,
};

const DEAD_SET: &str = r#"{
    "units": "metric",
    "densities": [{ "oil": 859.5, "water": 1033.0, "gas": 0.854 }],
    "oil": {
        "model": "dead_oil",
        "regions": [{
            "pressure": [20.0, 100.0, 200.0, 300.0, 400.0],
            "fvf": [1.150, 1.120, 1.100, 1.085, 1.075],
            "viscosity": [1.10, 1.18, 1.28, 1.38, 1.48]
        }]
    },
    "gas": {
        "model": "dry_gas",
        "regions": [{
            "pressure": [20.0, 100.0, 200.0, 300.0, 400.0],
            "fvf": [0.0600, 0.0115, 0.0058, 0.0042, 0.0035],
            "viscosity": [0.0130, 0.0150, 0.0190, 0.0230, 0.0265]
        }]
    },
    "water": {
        "model": "constant_compressibility",
        "regions": [{ "reference_pressure": 250.0, "reference_fvf": 1.03, "compressibility": 4.5e-5,
                      "reference_viscosity": 0.32, "viscosibility": 0.0 }]
    }
}"#;

fn positive_finite(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

#[test]
fn dead_oil_dry_gas_water_at_200_bar() {
    let set = PvtTableSet::from_json_str(DEAD_SET).unwrap();
    let oil = set.build_oil().unwrap().unwrap();
    let gas = set.build_gas().unwrap().unwrap();
    let water = set.build_water().unwrap().unwrap();
    let (t, p) = (273.0, 200.0e5);

    for (name, inv_b, mu) in [
        (
            "oil",
            oil.inverse_formation_volume_factor(0, t, p, 0.0),
            oil.viscosity(0, t, p, 0.0),
        ),
        (
            "gas",
            gas.inverse_formation_volume_factor(0, t, p, 0.0),
            gas.viscosity(0, t, p, 0.0),
        ),
        (
            "water",
            water.inverse_formation_volume_factor(0, t, p, 0.0),
            water.viscosity(0, t, p, 0.0),
        ),
    ] {
        assert!(positive_finite(inv_b), "{name} 1/B = {inv_b}");
        assert!(positive_finite(mu), "{name} mu = {mu}");
    }

    // the dead-oil node at 200 bar is reproduced
    assert!((oil.inverse_formation_volume_factor(0, t, p, 0.0) - 1.0 / 1.1).abs() < 1e-12);
    assert!((oil.viscosity(0, t, p, 0.0) - 1.28e-3).abs() < 1e-15);

    assert_eq!(oil.saturated_gas_dissolution_factor(0, t, p), 0.0);
    assert_eq!(gas.saturated_oil_vaporization_factor(0, t, p), 0.0);
    assert_eq!(water.saturated_dissolution_factor(0, t, p), 0.0);
}

fn water_is_water_pvt<W: WaterPvt>(_: &W) {}

#[test]
fn water_multiplexer_is_a_water_model() {
    let set = PvtTableSet::from_json_str(DEAD_SET).unwrap();
    let water = set.build_water().unwrap().unwrap();
    water_is_water_pvt(&water);
    assert_eq!(water.name(), "ConstantCompressibilityWater");
}

#[test]
fn live_oil_interpolates_saturated_rs() {
    let point = |pressure: f64, fvf: f64, viscosity: f64| PvtPoint {
        pressure,
        fvf,
        viscosity,
    };
    let table = LiveOilTable {
        rows: vec![
            PvtoRow {
                rs: 50.0,
                points: vec![point(100.0e5, 1.2, 1.0e-3), point(200.0e5, 1.19, 1.05e-3)],
            },
            PvtoRow {
                rs: 120.0,
                points: vec![point(300.0e5, 1.4, 0.8e-3), point(400.0e5, 1.39, 0.84e-3)],
            },
        ],
    };
    let oil = LiveOilPvt::new(&[table]).unwrap();

    let rs_100 = oil.saturated_gas_dissolution_factor(0, 273.0, 100.0e5);
    let rs_200 = oil.saturated_gas_dissolution_factor(0, 273.0, 200.0e5);
    let rs_300 = oil.saturated_gas_dissolution_factor(0, 273.0, 300.0e5);
    assert!((rs_100 - 50.0).abs() < 1e-9);
    assert!((rs_300 - 120.0).abs() < 1e-9);
    assert!(rs_200 > 50.0 && rs_200 < 120.0);
}

#[test]
fn field_units_convert_to_si() {
    let json = r#"{
        "units": "field",
        "densities": [{ "oil": 53.66, "water": 64.49, "gas": 0.0533 }],
        "reservoir_temperature": [200.0],
        "oil": {
            "model": "dead_oil",
            "regions": [{ "pressure": [400.0, 5000.0], "fvf": [1.012, 0.990], "viscosity": [1.16, 1.25] }]
        }
    }"#;
    let set = PvtTableSet::from_json_str(json).unwrap();
    let si = set.to_si();
    assert!((si.densities[0].oil - 859.5).abs() < 0.5);
    assert!((si.reservoir_temperature[0] - 366.48).abs() < 0.01);

    let oil = set.build_oil().unwrap().unwrap();
    // 400 psia is about 27.58 bar
    let inv_b = oil.inverse_formation_volume_factor(0, 366.0, 27.579e5, 0.0);
    assert!((inv_b - 1.0 / 1.012).abs() < 1e-5);
    assert!((oil.viscosity(0, 366.0, 27.579e5, 0.0) - 1.16e-3).abs() < 1e-7);
}

#[test]
fn vaporization_exponents_reach_their_models() {
    let mut set =
        PvtTableSet::from_json_str(include_str!("data/two_region_live.json")).unwrap();
    set.vap2 = 2.0;
    let oil = set.build_oil().unwrap().unwrap();
    let gas = set.build_gas().unwrap().unwrap();
    let p = 250.0e5;

    let rs = oil.saturated_gas_dissolution_factor(0, 273.0, p);
    let rs_scaled = oil.saturated_gas_dissolution_factor_with_saturation(0, 273.0, p, 0.25, 0.5);
    assert!((rs_scaled - 0.25 * rs).abs() < 1e-9);

    let rv = gas.saturated_oil_vaporization_factor(0, 273.0, p);
    let rv_scaled = gas.saturated_oil_vaporization_factor_with_saturation(0, 273.0, p, 0.5, 0.5);
    assert_eq!(rv_scaled, rv);
    // VAP2 alone leaves Rv untouched below the maximum too
    let rv_below = gas.saturated_oil_vaporization_factor_with_saturation(0, 273.0, p, 0.25, 0.5);
    assert_eq!(rv_below, rv);

    set.vap1 = 1.0;
    set.vap2 = 0.0;
    let oil = set.build_oil().unwrap().unwrap();
    let gas = set.build_gas().unwrap().unwrap();
    let rv_scaled = gas.saturated_oil_vaporization_factor_with_saturation(0, 273.0, p, 0.25, 0.5);
    assert!((rv_scaled - 0.5 * rv).abs() < 1e-15);
    let rs_unscaled = oil.saturated_gas_dissolution_factor_with_saturation(0, 273.0, p, 0.25, 0.5);
    assert_eq!(rs_unscaled, rs);
}
