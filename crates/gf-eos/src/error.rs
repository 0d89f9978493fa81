//! Equation-of-state and feed errors.

use gf_core::GfError;
use thiserror::Error;

/// Result type for equation-of-state operations.
pub type EosResult<T> = Result<T, EosError>;

/// Errors raised while setting up a model or validating its inputs.
///
/// Never produced during a Gibbs energy evaluation: per-phase failures are
/// reported as `NaN` (see [`crate::GibbsModel`]).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EosError {
    /// Non-physical values (negative amounts, pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Species count of the input does not match the model.
    #[error("Species mismatch: model has {expected} species, input has {found}")]
    SpeciesMismatch { expected: usize, found: usize },
}

impl From<EosError> for GfError {
    fn from(err: EosError) -> Self {
        match err {
            EosError::NonPhysical { what } => GfError::InvalidArg {
                what: format!("Non-physical value: {}", what),
            },
            EosError::InvalidArg { what } => GfError::InvalidArg {
                what: format!("Invalid model argument: {}", what),
            },
            EosError::SpeciesMismatch { expected, found } => GfError::DimensionMismatch {
                what: "species count",
                expected,
                found,
            },
        }
    }
}
