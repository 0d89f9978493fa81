//! Error types for optimizer setup.

use gf_core::error::GfError;
use thiserror::Error;

/// Errors that can occur before a search starts.
///
/// Once the search runs, nothing fails: budget or time exhaustion returns the
/// best candidate found so far.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimError {
    #[error("Invalid bounds: {what}")]
    InvalidBounds { what: String },

    #[error("Invalid optimizer configuration: {what}")]
    InvalidConfig { what: String },
}

pub type OptimResult<T> = Result<T, OptimError>;

impl From<OptimError> for GfError {
    fn from(e: OptimError) -> Self {
        match e {
            OptimError::InvalidBounds { what } => GfError::InvalidArg {
                what: format!("bounds: {}", what),
            },
            OptimError::InvalidConfig { what } => GfError::InvalidArg {
                what: format!("optimizer config: {}", what),
            },
        }
    }
}
