//! gf-core: stable foundation for gibbsflash.
//!
//! Contains:
//! - units (uom SI types + constructors, gas constant)
//! - numeric (Real + tolerances + float helpers)
//! - timing (accumulating timers and wall-clock deadlines)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{GfError, GfResult};
pub use numeric::*;
pub use units::*;
