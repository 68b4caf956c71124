//! bo-pvt: single-phase black-oil PVT models.
//!
//! Provides:
//! - Piecewise-linear tables with linear extrapolation
//! - Six models: live oil, dead oil and constant-compressibility oil,
//!   dry and wet gas, constant-compressibility water
//! - One closed multiplexer per phase that selects a model at setup time
//! - Serializable table records (`PvtTableSet`) with unit conversion
//! - Saturated-line sweeps and validation
//!
//! # Architecture
//!
//! Every model implements [`PvtModel`], generic over the scalar type
//! ([`bo_core::Evaluation`]), so the same code yields plain values or values
//! with derivatives. Models are immutable after construction and may be
//! queried from any number of threads. Setup errors are [`PvtError`]s; a
//! query with an invalid region or on an uninitialized multiplexer panics.
//!
//! # Example
//!
//! ```
//! use bo_pvt::{DeadOilPvt, DeadTableRecord, OilPvt, OilPvtMultiplexer, PvtModel};
//!
//! let pvdo = DeadTableRecord {
//!     pressure: vec![1.0e6, 4.0e7],
//!     fvf: vec![1.10, 1.05],
//!     viscosity: vec![1.0e-3, 1.2e-3],
//! };
//! let mut oil = OilPvtMultiplexer::default();
//! oil.initialize(DeadOilPvt::new(&[pvdo]).unwrap()).unwrap();
//!
//! let inv_b = oil.inverse_formation_volume_factor(0, 300.0, 2.0e7, 0.0);
//! assert!(inv_b > 1.0 / 1.10 && inv_b < 1.0 / 1.05);
//! assert_eq!(oil.saturated_gas_dissolution_factor(0, 300.0, 2.0e7), 0.0);
//! ```

pub mod correlation;
pub mod error;
pub mod gas;
pub mod model;
pub mod oil;
pub mod records;
pub mod sweep;
pub mod tabulated;
pub mod validate;
pub mod water;

// Re-exports for ergonomics
pub use correlation::ConstantCompressibilityRecord;
pub use error::{PvtError, PvtResult};
pub use gas::{DryGasPvt, GasPvtApproach, GasPvtMultiplexer, WetGasPvt};
pub use model::{GasPvt, OilPvt, PvtModel, VaporizationControl, WaterPvt};
pub use oil::{
    ConstantCompressibilityOilPvt, DeadOilPvt, LiveOilPvt, OilPvtApproach, OilPvtMultiplexer,
};
pub use records::{
    DeadTableRecord, DensityRecord, GasRecord, LiveOilTable, OilRecord, PvtPoint, PvtTableSet,
    PvtgRow, PvtoRow, RatioPoint, WaterRecord, WetGasTable,
};
pub use sweep::{PressureSweep, SaturatedLineSample, SweepType, sample_saturated_line};
pub use tabulated::{Tabulated1D, UniformXTabulated2D};
pub use validate::{SaturatedLineCheck, SaturatedLineReport};
pub use water::{ConstantCompressibilityWaterPvt, WaterPvtApproach, WaterPvtMultiplexer};
