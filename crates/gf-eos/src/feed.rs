//! Feed composition (total moles per species).

use crate::error::{EosError, EosResult};
use gf_core::Real;

/// Total mole amounts of each species in the system.
///
/// Index-aligned with the species ordering of the model. Entries are finite
/// and non-negative; the total is strictly positive. Species with zero amount
/// are kept so that indices stay aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    amounts: Vec<Real>,
    total: Real,
}

impl Feed {
    /// Create a feed from mole amounts [mol].
    ///
    /// Validates that all amounts are finite, non-negative, and have a positive sum.
    pub fn new(amounts: Vec<Real>) -> EosResult<Self> {
        if amounts.is_empty() {
            return Err(EosError::InvalidArg { what: "empty feed" });
        }

        let mut total = 0.0;
        for n in &amounts {
            if !n.is_finite() {
                return Err(EosError::NonPhysical {
                    what: "non-finite mole amount",
                });
            }
            if *n < 0.0 {
                return Err(EosError::NonPhysical {
                    what: "negative mole amount",
                });
            }
            total += n;
        }

        if total <= 0.0 || !total.is_finite() {
            return Err(EosError::NonPhysical {
                what: "mole amounts sum to zero or non-finite",
            });
        }

        Ok(Self { amounts, total })
    }

    /// Mole amounts per species.
    pub fn amounts(&self) -> &[Real] {
        &self.amounts
    }

    /// Total moles.
    pub fn total(&self) -> Real {
        self.total
    }

    /// Number of species.
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Overall mole fractions (sum to 1).
    pub fn mole_fractions(&self) -> Vec<Real> {
        self.amounts.iter().map(|n| n / self.total).collect()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use gf_core::numeric::{Tolerances, nearly_equal};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn fractions_sum_to_one(amounts in prop::collection::vec(0.0_f64..10.0_f64, 1..6)) {
            if let Ok(feed) = Feed::new(amounts) {
                let sum: f64 = feed.mole_fractions().iter().sum();
                let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
                prop_assert!(nearly_equal(sum, 1.0, tol));
            }
        }
    }
}
