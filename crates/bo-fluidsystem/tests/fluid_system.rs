//! Fluid-system property queries over a two-region live-oil/wet-gas setup.

use bo_core::{Component, Phase, units::constants::SURFACE_TEMPERATURE_K};
use bo_fluidsystem::{
    BlackOilFluidSystem, FluidStateSource, FluidSystemBuilder, SimpleFluidState,
};
use bo_pvt::{GasPvt, OilPvt, PressureSweep, PvtModel, PvtTableSet};

fn system() -> BlackOilFluidSystem {
    let set = PvtTableSet::from_json_str(include_str!("data/two_region_live.json")).unwrap();
    FluidSystemBuilder::from_table_set(&set)
        .unwrap()
        .build()
        .unwrap()
}

/// Source that also reports Rs and Rv.
struct WithRatios {
    base: SimpleFluidState<f64>,
    rs: f64,
    rv: f64,
}

impl FluidStateSource<f64> for WithRatios {
    fn pressure(&self, phase: Phase) -> f64 {
        self.base.pressure(phase)
    }
    fn saturation(&self, phase: Phase) -> f64 {
        self.base.saturation(phase)
    }
    fn density(&self, phase: Phase) -> f64 {
        self.base.density(phase)
    }
    fn temperature(&self, phase: Phase) -> f64 {
        self.base.temperature(phase)
    }
    fn enthalpy(&self, phase: Phase) -> f64 {
        self.base.enthalpy(phase)
    }
    fn rs(&self) -> Option<f64> {
        Some(self.rs)
    }
    fn rv(&self) -> Option<f64> {
        Some(self.rv)
    }
}

#[test]
fn table_set_wires_every_phase() {
    let fs = system();
    assert_eq!(fs.num_regions(), 2);
    assert_eq!(fs.num_active_phases(), 3);
    assert!(fs.enable_dissolved_gas());
    assert!(fs.enable_vaporized_oil());
    assert!(!fs.enable_energy());
    assert!((fs.reservoir_temperature(1) - 368.15).abs() < 1e-9);
    assert_eq!(fs.reference_density(Phase::Gas, 1), 0.9);
    assert_ne!(fs.reservoir_temperature(0), SURFACE_TEMPERATURE_K);
}

#[test]
fn saturated_switch_selects_branch() {
    let fs = system();
    let t = 273.0;
    let sweep = PressureSweep::linear(30.0e5, 350.0e5, 12).unwrap();
    for region in 0..fs.num_regions() {
        for p in sweep.points() {
            let rs_sat = fs.oil_pvt().saturated_gas_dissolution_factor(region, t, p);
            let rv_sat = fs.gas_pvt().saturated_oil_vaporization_factor(region, t, p);

            // gas present and oil saturated: saturated branch
            let saturated = WithRatios {
                base: SimpleFluidState::new(p, t, [0.2, 0.5, 0.3]),
                rs: rs_sat,
                rv: rv_sat,
            };
            let mu_o = fs.viscosity(&saturated, Phase::Oil, region);
            assert_eq!(mu_o, fs.oil_pvt().saturated_viscosity(region, t, p));
            let mu_g = fs.viscosity(&saturated, Phase::Gas, region);
            assert_eq!(mu_g, fs.gas_pvt().saturated_viscosity(region, t, p));

            // no gas: undersaturated branch even at the saturated ratio
            let no_gas = WithRatios {
                base: SimpleFluidState::new(p, t, [0.3, 0.7, 0.0]),
                rs: rs_sat,
                rv: 0.0,
            };
            let b_o = fs.inverse_formation_volume_factor(&no_gas, Phase::Oil, region);
            assert_eq!(
                b_o,
                fs.oil_pvt()
                    .inverse_formation_volume_factor(region, t, p, rs_sat)
            );
            // consistency makes both branches agree on the saturated line
            let b_sat = fs.saturated_inverse_formation_volume_factor(&no_gas, Phase::Oil, region);
            assert!((b_o - b_sat).abs() <= bo_core::SQRT_EPSILON);
        }
    }
}

#[test]
fn properties_are_physical_on_the_saturated_line() {
    let fs = system();
    let t = 273.0;
    for region in 0..fs.num_regions() {
        for p in PressureSweep::saturated_line_default().points() {
            let base = SimpleFluidState::new(p, t, [0.2, 0.4, 0.4]);
            let state = WithRatios {
                rs: fs.saturated_dissolution_factor(&base, Phase::Oil, region),
                rv: fs.saturated_dissolution_factor(&base, Phase::Gas, region),
                base,
            };
            for phase in Phase::ALL {
                let mu = fs.viscosity(&state, phase, region);
                let b = fs.inverse_formation_volume_factor(&state, phase, region);
                let rho = fs.density(&state, phase, region);
                assert!(mu.is_finite() && mu > 0.0, "{phase} mu = {mu} at {p}");
                assert!(b.is_finite() && b > 0.0, "{phase} 1/B = {b} at {p}");
                assert!(rho.is_finite() && rho > 0.0, "{phase} rho = {rho} at {p}");
            }
            assert_eq!(fs.saturated_dissolution_factor(&state, Phase::Water, region), 0.0);
        }
    }
}

#[test]
fn oil_density_includes_dissolved_gas() {
    let fs = system();
    let (t, p) = (273.0, 150.0e5);
    let base = SimpleFluidState::new(p, t, [0.2, 0.8, 0.0]);
    let rs = fs.saturated_dissolution_factor(&base, Phase::Oil, 0);
    let state = WithRatios { base, rs, rv: 0.0 };

    let b = fs.inverse_formation_volume_factor(&state, Phase::Oil, 0);
    let expected = b * (850.0 + rs * 0.85);
    assert!((fs.density(&state, Phase::Oil, 0) - expected).abs() < 1e-9);
}

#[test]
fn mass_fraction_conversions_invert() {
    let fs = system();
    for rs in [0.0, 12.5, 80.0] {
        let x = fs.convert_rs_to_xog(rs, 1);
        assert!((fs.convert_xog_to_rs(x, 1) - rs).abs() < 1e-9);
    }
    for rv in [0.0, 1.0e-5, 2.0e-4] {
        let x = fs.convert_rv_to_xgo(rv, 0);
        assert!((fs.convert_xgo_to_rv(x, 0) - rv).abs() < 1e-15);
    }
}

#[test]
fn ratios_derived_from_mass_fractions() {
    let fs = system();
    let mut source = SimpleFluidState::new(200.0e5, 273.0, [0.2, 0.5, 0.3]);
    let xog = fs.convert_rs_to_xog(60.0, 0);
    let xgo = fs.convert_rv_to_xgo(1.0e-4, 0);
    let mut x = [[0.0; Component::COUNT]; Phase::COUNT];
    x[Phase::Oil.index()][Component::Gas.index()] = xog;
    x[Phase::Oil.index()][Component::Oil.index()] = 1.0 - xog;
    x[Phase::Gas.index()][Component::Oil.index()] = xgo;
    x[Phase::Gas.index()][Component::Gas.index()] = 1.0 - xgo;
    source.mass_fractions = Some(x);

    assert!((fs.rs_of(&source, 0) - 60.0).abs() < 1e-9);
    assert!((fs.rv_of(&source, 0) - 1.0e-4).abs() < 1e-15);

    source.mass_fractions = None;
    assert_eq!(fs.rs_of(&source, 0), 0.0);
}

#[test]
fn saturation_pressure_round_trip() {
    let fs = system();
    let base = SimpleFluidState::new(220.0e5, 273.0, [0.2, 0.5, 0.3]);
    let rs = fs.saturated_dissolution_factor(&base, Phase::Oil, 1);
    let state = WithRatios { base, rs, rv: 0.0 };
    let p_b = fs.saturation_pressure(&state, Phase::Oil, 1);
    assert!((p_b - 220.0e5).abs() < 1e-3);
    assert_eq!(fs.saturation_pressure(&state, Phase::Water, 1), 0.0);
}

#[test]
fn vaporization_control_uses_oil_saturation() {
    let mut set = PvtTableSet::from_json_str(include_str!("data/two_region_live.json")).unwrap();
    set.vap2 = 1.0;
    let fs = FluidSystemBuilder::from_table_set(&set)
        .unwrap()
        .build()
        .unwrap();
    let state = SimpleFluidState::new(250.0e5, 273.0, [0.2, 0.4, 0.4]);

    let rs = fs.saturated_dissolution_factor(&state, Phase::Oil, 0);
    let rs_scaled =
        fs.saturated_dissolution_factor_with_max_oil_saturation(&state, Phase::Oil, 0, 0.8);
    assert!((rs_scaled - 0.5 * rs).abs() < 1e-9);
}

#[test]
fn system_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BlackOilFluidSystem>();

    let fs = system();
    let results: Vec<f64> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..2)
            .map(|region| {
                let fs = &fs;
                scope.spawn(move || {
                    let state = SimpleFluidState::new(100.0e5, 300.0, [0.3, 0.7, 0.0]);
                    fs.viscosity(&state, Phase::Water, region)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(results.iter().all(|mu| *mu > 0.0));
}

mod proptests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn oversaturated_oil_with_gas_uses_saturated_branch(
            p in 20.0e5..500.0e5f64,
            excess in 0.0..50.0f64,
            sg in 0.01..0.9f64,
            region in 0usize..2,
        ) {
            let fs = system();
            let t = 300.0;
            let rs_sat = fs.oil_pvt().saturated_gas_dissolution_factor(region, t, p);
            let state = WithRatios {
                base: SimpleFluidState::new(p, t, [0.0, 1.0 - sg, sg]),
                rs: rs_sat + excess,
                rv: 0.0,
            };
            prop_assert_eq!(
                fs.viscosity(&state, Phase::Oil, region),
                fs.oil_pvt().saturated_viscosity(region, t, p)
            );
            prop_assert_eq!(
                fs.inverse_formation_volume_factor(&state, Phase::Oil, region),
                fs.oil_pvt().saturated_inverse_formation_volume_factor(region, t, p)
            );
        }

        #[test]
        fn gas_mass_fraction_stays_below_one(rs in 0.0..500.0f64, region in 0usize..2) {
            let fs = system();
            let x = fs.convert_rs_to_xog(rs, region);
            prop_assert!((0.0..1.0).contains(&x));
            assert_relative_eq!(fs.convert_xog_to_rs(x, region), rs, max_relative = 1e-12, epsilon = 1e-12);
        }
    }
}
