//! Fluid-state scenarios: assignment, feature isolation and fallbacks.

use bo_core::Phase;
use bo_fluidsystem::{
    BlackOil, BlackOilFluidState, BlackOilFluidSystem, EnergyBlackOil, FluidFeatures,
    FluidStateSource, FluidSystemBuilder, Immiscible, SimpleFluidState, ThermalBlackOil,
};
use bo_pvt::{OilPvt, PvtModel, PvtTableSet};
use approx::assert_relative_eq;
use num_dual::Dual64;

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

fn dead_system() -> BlackOilFluidSystem {
    let set = PvtTableSet::from_json_str(DEAD_SET).unwrap();
    FluidSystemBuilder::from_table_set(&set)
        .unwrap()
        .build()
        .unwrap()
}

fn live_system() -> BlackOilFluidSystem {
    let set = PvtTableSet::from_json_str(include_str!("data/two_region_live.json")).unwrap();
    FluidSystemBuilder::from_table_set(&set)
        .unwrap()
        .build()
        .unwrap()
}

fn source(pressure: f64, temperature: f64) -> SimpleFluidState<f64> {
    let mut s = SimpleFluidState::new(pressure, temperature, [0.2, 0.5, 0.3]);
    s.density = [1000.0, 800.0, 150.0];
    s.enthalpy = [4.0e5, 3.0e5, 6.0e5];
    s
}

fn same_state<F: FluidFeatures>(
    a: &BlackOilFluidState<'_, f64, F>,
    b: &BlackOilFluidState<'_, f64, F>,
) -> bool {
    Phase::ALL.iter().all(|&phase| {
        a.pressure(phase) == b.pressure(phase)
            && a.saturation(phase) == b.saturation(phase)
            && a.density(phase) == b.density(phase)
            && a.inv_b(phase) == b.inv_b(phase)
            && a.temperature(phase) == b.temperature(phase)
    }) && a.rs() == b.rs()
        && a.rv() == b.rv()
        && a.pvt_region_index() == b.pvt_region_index()
}

#[test]
fn dead_oil_dry_gas_water_at_200_bar_and_273_k() {
    let system = dead_system();
    assert!(!system.enable_dissolved_gas());
    assert!(!system.enable_vaporized_oil());

    let mut state = BlackOilFluidState::<f64, ThermalBlackOil>::new(&system);
    state.set_temperature(273.0);
    state.set_rs(0.0);
    state.set_rv(0.0);
    for phase in Phase::ALL {
        state.set_pressure(phase, 200.0e5);
        state.set_saturation(phase, 1.0 / 3.0);
        state.set_density(phase, 1.0);
    }
    for phase in Phase::ALL {
        let inv_b = system.inverse_formation_volume_factor(&state, phase, 0);
        state.set_inv_b(phase, inv_b);
    }
    state.check_defined();

    for phase in Phase::ALL {
        let mu = state.viscosity(phase);
        let inv_b = state.inv_b(phase);
        assert!(mu.is_finite() && mu > 0.0, "{phase} mu = {mu}");
        assert!(inv_b.is_finite() && inv_b > 0.0, "{phase} 1/B = {inv_b}");
    }
    assert_eq!(state.rs(), 0.0);
    assert_eq!(state.rv(), 0.0);
    assert_relative_eq!(state.viscosity(Phase::Oil), 1.28e-3, max_relative = 1e-12);
    assert_relative_eq!(state.inv_b(Phase::Gas), 1.0 / 0.0058, max_relative = 1e-12);
}

#[test]
fn assign_derives_black_oil_quantities() {
    let system = dead_system();
    let mut state = BlackOilFluidState::<f64, BlackOil>::new(&system);
    state.assign(&source(200.0e5, 273.0));
    state.check_defined();

    assert_eq!(state.pressure(Phase::Gas), 200.0e5);
    assert_eq!(state.saturation(Phase::Oil), 0.5);
    assert_eq!(state.density(Phase::Water), 1000.0);
    assert_eq!(state.rs(), 0.0);
    assert!((state.inv_b(Phase::Oil) - 1.0 / 1.1).abs() < 1e-12);
    // no stored temperature: reservoir temperature, here the surface default
    assert_eq!(
        state.temperature(Phase::Oil),
        bo_core::units::constants::SURFACE_TEMPERATURE_K
    );
}

#[test]
fn assign_is_idempotent() {
    let system = live_system();
    let mut state = BlackOilFluidState::<f64, EnergyBlackOil>::new(&system);
    let src = source(180.0e5, 350.0);
    state.assign(&src);
    let first = state;
    state.assign(&src);
    assert!(same_state(&first, &state));

    // assigning a state from a copy of itself changes nothing
    let copy = state;
    state.assign(&copy);
    assert!(same_state(&copy, &state));
    assert_eq!(state.enthalpy(Phase::Gas), 6.0e5);
    assert_eq!(state.temperature(Phase::Water), 350.0);
}

#[test]
fn assign_takes_region_and_ratios_from_a_black_oil_source() {
    let system = live_system();
    let mut a = BlackOilFluidState::<f64, BlackOil>::new(&system);
    a.assign(&source(150.0e5, 300.0));
    a.set_pvt_region_index(1);
    a.set_rs(40.0);
    a.set_rv(2.0e-5);

    let mut b = BlackOilFluidState::<f64, BlackOil>::new(&system);
    b.assign(&a);
    assert_eq!(b.pvt_region_index(), 1);
    assert_eq!(b.rs(), 40.0);
    assert_eq!(b.rv(), 2.0e-5);
    assert_eq!(b.inv_b(Phase::Oil), a.inv_b(Phase::Oil));

    // dropping dissolution on the target ignores the source ratios
    let mut c = BlackOilFluidState::<f64, Immiscible>::new(&system);
    c.assign(&a);
    assert_eq!(c.rs(), 0.0);
    assert_eq!(c.rv(), 0.0);
}

#[test]
fn temperature_falls_back_per_region() {
    let system = live_system();
    let mut state = BlackOilFluidState::<f64, BlackOil>::new(&system);
    assert_relative_eq!(state.temperature(Phase::Oil), 363.15, epsilon = 1e-9);
    state.set_pvt_region_index(1);
    assert_relative_eq!(state.temperature(Phase::Gas), 368.15, epsilon = 1e-9);
    assert_eq!(
        FluidStateSource::temperature(&state, Phase::Water),
        state.temperature(Phase::Water)
    );
}

#[test]
fn two_phase_state_assigns_active_phases_only() {
    let set = PvtTableSet::from_json_str(
        r#"{
        "densities": [{ "oil": 850.0, "water": 1000.0, "gas": 1.0 }],
        "oil": { "model": "constant_compressibility",
                 "regions": [{ "reference_pressure": 2.0e7, "reference_fvf": 1.2,
                               "compressibility": 1.0e-9, "reference_viscosity": 1.0e-3 }] },
        "water": { "model": "constant_compressibility",
                   "regions": [{ "reference_pressure": 2.0e7, "reference_fvf": 1.01,
                                 "compressibility": 4.0e-10, "reference_viscosity": 5.0e-4 }] }
    }"#,
    )
    .unwrap();
    let system = FluidSystemBuilder::from_table_set(&set)
        .unwrap()
        .build()
        .unwrap();
    assert!(!system.phase_is_active(Phase::Gas));

    let mut state = BlackOilFluidState::<f64, Immiscible, 2>::new(&system);
    state.assign(&source(2.0e7, 300.0));
    state.check_defined();
    assert!((state.inv_b(Phase::Oil) - 1.0 / 1.2).abs() < 1e-12);
    assert!((state.viscosity(Phase::Water) - 5.0e-4).abs() < 1e-15);
    assert_eq!(state.saturation(Phase::Water), 0.2);
}

#[test]
fn dual_numbers_carry_pressure_derivatives() {
    let system = live_system();
    let mut state = BlackOilFluidState::<Dual64, BlackOil>::new(&system);
    let p = Dual64::from(150.0e5).derivative();
    let rs = system
        .oil_pvt()
        .saturated_gas_dissolution_factor(0, Dual64::from(363.15), p);
    for phase in Phase::ALL {
        state.set_pressure(phase, p);
        state.set_saturation(phase, Dual64::from(1.0 / 3.0));
    }
    state.set_rs(rs);
    state.set_rv(Dual64::from(0.0));

    let mu = state.viscosity(Phase::Oil);
    let mu_sat = system
        .oil_pvt()
        .saturated_viscosity(0, Dual64::from(363.15), p);
    assert_eq!(mu.re, mu_sat.re);
    assert_eq!(mu.eps, mu_sat.eps);
    assert!(mu.eps.is_finite());

    let b_w = system.inverse_formation_volume_factor(&state, Phase::Water, 0);
    assert!(b_w.eps > 0.0, "water 1/B grows with pressure");
}
