//! Box constraints for the search space.

use crate::error::{OptimError, OptimResult};
use nalgebra::DVector;
use rand::Rng;

/// Axis-aligned box `lower[j] <= x[j] <= upper[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: DVector<f64>,
    upper: DVector<f64>,
}

impl Bounds {
    /// Create bounds, checking that both corners are finite, have the same
    /// length, and that every lower edge is strictly below its upper edge.
    pub fn new(lower: DVector<f64>, upper: DVector<f64>) -> OptimResult<Self> {
        if lower.is_empty() {
            return Err(OptimError::InvalidBounds {
                what: "zero-dimensional search space".to_string(),
            });
        }
        if lower.len() != upper.len() {
            return Err(OptimError::InvalidBounds {
                what: format!(
                    "lower has {} entries, upper has {}",
                    lower.len(),
                    upper.len()
                ),
            });
        }
        for j in 0..lower.len() {
            let (lo, hi) = (lower[j], upper[j]);
            if !lo.is_finite() || !hi.is_finite() {
                return Err(OptimError::InvalidBounds {
                    what: format!("non-finite edge in dimension {}", j),
                });
            }
            if lo >= hi {
                return Err(OptimError::InvalidBounds {
                    what: format!("empty interval [{}, {}] in dimension {}", lo, hi, j),
                });
            }
        }
        Ok(Self { lower, upper })
    }

    /// The unit hypercube `[0, 1]^dim`.
    pub fn unit_cube(dim: usize) -> OptimResult<Self> {
        Self::new(DVector::zeros(dim), DVector::from_element(dim, 1.0))
    }

    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    pub fn lower(&self) -> &DVector<f64> {
        &self.lower
    }

    pub fn upper(&self) -> &DVector<f64> {
        &self.upper
    }

    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.dim()
            && x
                .iter()
                .enumerate()
                .all(|(j, v)| *v >= self.lower[j] && *v <= self.upper[j])
    }

    /// Project `x` onto the box.
    pub fn clamp(&self, x: &mut DVector<f64>) {
        for j in 0..x.len().min(self.dim()) {
            x[j] = x[j].clamp(self.lower[j], self.upper[j]);
        }
    }

    /// Uniform sample inside the box.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> DVector<f64> {
        DVector::from_fn(self.dim(), |j, _| {
            self.lower[j] + rng.random::<f64>() * (self.upper[j] - self.lower[j])
        })
    }
}
