//! PVT table construction and validation errors.

use bo_core::{CoreError, RegionIdx};
use thiserror::Error;

/// Result type for PVT setup operations.
pub type PvtResult<T> = Result<T, PvtError>;

/// Errors detected while building or validating PVT tables.
///
/// Every variant describes malformed input data or an inconsistent setup.
/// Property queries themselves never fail; a wiring bug at query time
/// (unknown region, uninitialized multiplexer) panics instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PvtError {
    /// Table has fewer sampling points than interpolation needs.
    #[error("Table {what} needs at least {min} samples, got {got}")]
    TooFewSamples {
        what: &'static str,
        min: usize,
        got: usize,
    },

    /// Key and value columns have different lengths.
    #[error("Table {what} has {keys} keys but {values} values")]
    LengthMismatch {
        what: &'static str,
        keys: usize,
        values: usize,
    },

    /// Table keys are not strictly increasing.
    #[error("Table {what} keys are not strictly increasing at sample {index}")]
    NonMonotonicKeys { what: &'static str, index: usize },

    /// Non-physical value (non-positive FVF or viscosity, non-finite data).
    #[error("Non-physical value for {what} in region {region}")]
    NonPhysical { what: &'static str, region: RegionIdx },

    /// A live-oil or wet-gas table lacks undersaturated data to extend from.
    #[error("{what} in region {region} has no column with undersaturated data")]
    MissingUndersaturatedData { what: &'static str, region: RegionIdx },

    /// Saturated dissolution/vaporization factor decreases with pressure.
    #[error("Saturated {what} decreases with pressure in region {region} at p = {pressure} Pa")]
    NonMonotonicSaturatedLine {
        what: &'static str,
        region: RegionIdx,
        pressure: f64,
    },

    /// Undersaturated branch at the saturated ratio disagrees with the saturated branch.
    #[error(
        "Saturated and undersaturated {what} disagree in region {region} at p = {pressure} Pa: \
         {undersaturated} vs {saturated}"
    )]
    InconsistentSaturatedLine {
        what: &'static str,
        region: RegionIdx,
        pressure: f64,
        undersaturated: f64,
        saturated: f64,
    },

    /// Per-region inputs disagree on the number of PVT regions.
    #[error("{what} has {got} regions, expected {expected}")]
    RegionCountMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// A multiplexer may only be tagged once.
    #[error("{what} PVT multiplexer is already initialized")]
    AlreadyInitialized { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Table set could not be deserialized.
    #[error("Invalid table set: {message}")]
    Input { message: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<serde_json::Error> for PvtError {
    fn from(err: serde_json::Error) -> Self {
        PvtError::Input {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PvtError::NonMonotonicKeys {
            what: "PVDO pressure",
            index: 3,
        };
        assert!(err.to_string().contains("PVDO pressure"));

        let err = PvtError::InconsistentSaturatedLine {
            what: "oil inverse FVF",
            region: 1,
            pressure: 2.0e7,
            undersaturated: 0.8,
            saturated: 0.81,
        };
        let msg = err.to_string();
        assert!(msg.contains("region 1"));
        assert!(msg.contains("oil inverse FVF"));
    }

    #[test]
    fn core_error_converts() {
        let err: PvtError = CoreError::InvalidArg { what: "x" }.into();
        assert!(matches!(err, PvtError::Core(_)));
    }

    #[test]
    fn json_error_converts() {
        let err: PvtError = serde_json::from_str::<Vec<f64>>("[1.0,")
            .unwrap_err()
            .into();
        assert!(matches!(err, PvtError::Input { .. }));
    }
}
