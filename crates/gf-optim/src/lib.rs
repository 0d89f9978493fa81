//! Derivative-free global optimization over a bounded box.
//!
//! This crate provides a seeded differential evolution minimizer with two
//! independent stopping conditions: an evaluation budget and a wall-clock
//! time limit. Neither condition is an error; the best candidate found so far
//! is always returned.

pub mod bounds;
pub mod de;
pub mod error;

pub use bounds::Bounds;
pub use de::{DeConfig, DeResult, DifferentialEvolution, StopReason, minimize};
pub use error::{OptimError, OptimResult};
