use bo_pvt::PvtError;
use thiserror::Error;

pub type FluidSystemResult<T> = Result<T, FluidSystemError>;

/// Errors raised while wiring a fluid system.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidSystemError {
    #[error("No active phase")]
    NoActivePhase,

    #[error("Region count mismatch for {what}: expected {expected}, got {got}")]
    RegionCountMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Invalid feature combination: {what}")]
    InvalidFeature { what: &'static str },

    #[error("Non-physical {what} in region {region}: {value}")]
    NonPhysical {
        what: &'static str,
        region: usize,
        value: f64,
    },

    #[error(transparent)]
    Pvt(#[from] PvtError),
}
