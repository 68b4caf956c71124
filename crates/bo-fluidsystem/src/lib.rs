//! bo-fluidsystem: black-oil fluid system and fluid state.
//!
//! Provides:
//! - `BlackOilFluidSystem`: one PVT multiplexer per phase, active phases,
//!   per-region reference densities and reservoir temperatures
//! - `FluidSystemBuilder` with setup-time validation
//! - `BlackOilFluidState`: per-phase state whose optional quantities are
//!   selected at compile time (zero-size when disabled)
//! - `FluidStateSource`: the read interface `assign` copies from
//!
//! # Example
//!
//! ```
//! use bo_core::Phase;
//! use bo_fluidsystem::{BlackOilFluidState, FluidSystemBuilder, Immiscible};
//! use bo_pvt::{DeadOilPvt, DeadTableRecord, DensityRecord};
//!
//! let mut builder = FluidSystemBuilder::new();
//! builder
//!     .set_oil_pvt(DeadOilPvt::new(&[DeadTableRecord {
//!         pressure: vec![1.0e6, 4.0e7],
//!         fvf: vec![1.10, 1.05],
//!         viscosity: vec![1.0e-3, 1.2e-3],
//!     }]).unwrap())
//!     .unwrap();
//! builder.set_reference_densities(vec![DensityRecord { oil: 850.0, water: 1000.0, gas: 0.9 }]);
//! let system = builder.build().unwrap();
//!
//! // dead oil: no dissolution storage, Rs reads zero
//! let mut state = BlackOilFluidState::<f64, Immiscible>::new(&system);
//! state.set_pressure(Phase::Oil, 2.0e7);
//! assert!(state.viscosity(Phase::Oil) > 1.0e-3);
//! assert_eq!(state.rs(), 0.0);
//! ```

pub mod builder;
pub mod conditional;
pub mod error;
pub mod fluid_state;
pub mod phase_map;
pub mod source;
pub mod system;

// Re-exports for ergonomics
pub use builder::FluidSystemBuilder;
pub use conditional::{
    Absent, BlackOil, ConditionalStorage, Disabled, Enabled, EnergyBlackOil, Features,
    FluidFeatures, Immiscible, Or, Present, Slot, ThermalBlackOil, Toggle,
};
pub use error::{FluidSystemError, FluidSystemResult};
pub use fluid_state::BlackOilFluidState;
pub use phase_map::PhaseIndexMap;
pub use source::{FluidStateSource, SimpleFluidState};
pub use system::BlackOilFluidSystem;
