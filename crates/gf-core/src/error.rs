use thiserror::Error;

pub type GfResult<T> = Result<T, GfError>;

#[derive(Error, Debug)]
pub enum GfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Dimension mismatch: {what} (expected={expected}, found={found})")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}
