//! bo-core: stable foundation for the black-oil workspace.
//!
//! Contains:
//! - numeric (`Evaluation` scalar trait, tolerances, float helpers)
//! - phase (canonical phase and component indices)
//! - units (uom SI types, constructors and deck unit-system conversion)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod phase;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use phase::*;
pub use units::UnitSystem;
