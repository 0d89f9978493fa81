//! Error types for flash calculations.

use gf_core::error::GfError;
use gf_eos::EosError;
use gf_optim::OptimError;
use thiserror::Error;

/// Precondition violations of a flash call.
///
/// Numerical trouble during the search is not an error: failed evaluations
/// are absorbed by the objective and budget exhaustion returns the best
/// partition found.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlashError {
    #[error("Invalid flash input: {what}")]
    InvalidInput { what: String },

    #[error("Model input error: {0}")]
    Eos(#[from] EosError),

    #[error("Optimizer setup error: {0}")]
    Optim(#[from] OptimError),
}

pub type FlashResult<T> = Result<T, FlashError>;

impl From<FlashError> for GfError {
    fn from(e: FlashError) -> Self {
        match e {
            FlashError::InvalidInput { what } => GfError::InvalidArg { what },
            FlashError::Eos(e) => e.into(),
            FlashError::Optim(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_errors_convert() {
        let err: FlashError = EosError::NonPhysical { what: "pressure" }.into();
        assert!(err.to_string().contains("pressure"));
        let gf: GfError = err.into();
        assert!(matches!(gf, GfError::InvalidArg { .. }));

        let err = FlashError::InvalidInput {
            what: "need at least two phases".into(),
        };
        let gf: GfError = err.into();
        assert!(gf.to_string().contains("two phases"));
    }
}
