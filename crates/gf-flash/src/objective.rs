//! Gibbs energy objective over the decision space.

use crate::codec;
use gf_core::Real;
use gf_core::units::constants::rt;
use gf_core::units::{Pressure, Temperature};
use gf_eos::{Feed, GibbsModel};
use nalgebra::DMatrix;

/// Value returned in place of a non-finite Gibbs energy.
pub const DEFAULT_SENTINEL: Real = 1e10;

/// Dimensionless Gibbs energy `G / (R T N)` of a partition of the feed.
///
/// Holds only shared, read-only state; every call to [`evaluate`](Self::evaluate)
/// allocates its own scratch, so one objective can be evaluated from many
/// threads at once.
pub struct GibbsObjective<'a, M: GibbsModel + ?Sized> {
    model: &'a M,
    p: Pressure,
    t: Temperature,
    feed: &'a Feed,
    num_phases: usize,
    sentinel: Real,
}

impl<'a, M: GibbsModel + ?Sized> GibbsObjective<'a, M> {
    pub fn new(
        model: &'a M,
        p: Pressure,
        t: Temperature,
        feed: &'a Feed,
        num_phases: usize,
        sentinel: Real,
    ) -> Self {
        Self {
            model,
            p,
            t,
            feed,
            num_phases,
            sentinel,
        }
    }

    /// Length of the decision vectors this objective accepts.
    pub fn dim(&self) -> usize {
        codec::decision_len(self.num_phases, self.feed.len())
    }

    pub fn sentinel(&self) -> Real {
        self.sentinel
    }

    /// Evaluate a flat, phase-major decision vector.
    ///
    /// Returns the sentinel when the model yields a non-finite energy for any
    /// phase, and also for a decision vector of the wrong length.
    pub fn evaluate(&self, x: &[Real]) -> Real {
        let ns = self.feed.len();
        if self.num_phases < 2 || x.len() != self.dim() {
            return self.sentinel;
        }

        let mut allocation = DMatrix::zeros(self.num_phases, ns);
        codec::fill_allocation(|i, j| x[i * ns + j], self.feed.amounts(), &mut allocation);
        reduced_gibbs(
            self.model,
            self.p,
            self.t,
            &allocation,
            self.feed.total(),
            self.sentinel,
        )
    }
}

/// Evaluate a `(P-1) x S` divider matrix against the feed `total`.
///
/// Standalone form of [`GibbsObjective::evaluate`] for callers that hold the
/// dividers as a matrix. Malformed shapes give the sentinel.
pub fn evaluate<M: GibbsModel + ?Sized>(
    model: &M,
    p: Pressure,
    t: Temperature,
    total: &[Real],
    dividers: &DMatrix<Real>,
    sentinel: Real,
) -> Real {
    match codec::decode(dividers, total) {
        Ok(partition) => {
            let n_total: Real = total.iter().sum();
            reduced_gibbs(model, p, t, &partition.allocation, n_total, sentinel)
        }
        Err(_) => sentinel,
    }
}

/// Sum of per-phase Gibbs energies divided by `R T N`.
fn reduced_gibbs<M: GibbsModel + ?Sized>(
    model: &M,
    p: Pressure,
    t: Temperature,
    allocation: &DMatrix<Real>,
    n_total: Real,
    sentinel: Real,
) -> Real {
    // One row buffer per evaluation, reused across its phases.
    let mut moles = vec![0.0; allocation.ncols()];
    let mut g = 0.0;
    for row in allocation.row_iter() {
        for (dst, src) in moles.iter_mut().zip(row.iter()) {
            *dst = *src;
        }
        g += model.gibbs_energy(p, t, &moles);
    }

    let value = g / (rt(t.value) * n_total);
    if value.is_finite() { value } else { sentinel }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_core::units::{k, pa};
    use gf_eos::{CountingModel, FnModel, IdealMixture};

    #[test]
    fn nan_model_yields_sentinel() {
        let model = FnModel::new("nan", 2, |_, _, _: &[Real]| Real::NAN);
        let feed = Feed::new(vec![1.0, 1.0]).unwrap();
        let obj = GibbsObjective::new(&model, pa(1e5), k(300.0), &feed, 3, 1e9);

        for x in [[0.1, 0.2, 0.3, 0.4], [0.9, 0.9, 0.01, 0.5]] {
            let v = obj.evaluate(&x);
            assert_eq!(v, 1e9);
        }
    }

    #[test]
    fn single_failing_phase_poisons_the_sum() {
        // fails only for phases richer than 90% in species 0
        let model = FnModel::new("partial", 2, |_, _, n: &[Real]| {
            let total = n[0] + n[1];
            if total > 0.0 && n[0] / total > 0.9 {
                Real::NAN
            } else {
                -total
            }
        });
        let feed = Feed::new(vec![1.0, 1.0]).unwrap();
        let obj = GibbsObjective::new(&model, pa(1e5), k(300.0), &feed, 2, DEFAULT_SENTINEL);

        assert_eq!(obj.evaluate(&[0.99, 0.01]), DEFAULT_SENTINEL);
        assert!(obj.evaluate(&[0.5, 0.5]).is_finite());
    }

    #[test]
    fn infinite_energy_also_substituted() {
        let model = FnModel::new("inf", 1, |_, _, _: &[Real]| Real::INFINITY);
        let feed = Feed::new(vec![1.0]).unwrap();
        let obj = GibbsObjective::new(&model, pa(1e5), k(300.0), &feed, 2, 42.0);
        assert_eq!(obj.evaluate(&[0.5]), 42.0);
    }

    #[test]
    fn ideal_value_is_reduced_per_mole() {
        let model = IdealMixture::new(2);
        let feed = Feed::new(vec![1.0, 1.0]).unwrap();
        let obj = GibbsObjective::new(&model, pa(1e5), k(300.0), &feed, 2, DEFAULT_SENTINEL);

        // equal split keeps both phases at the feed composition
        let v = obj.evaluate(&[0.5, 0.5]);
        assert!((v - (0.5_f64).ln()).abs() < 1e-12);

        // unequal compositions cost Gibbs energy
        assert!(obj.evaluate(&[0.9, 0.1]) > v);
    }

    #[test]
    fn calls_model_once_per_phase() {
        let model = CountingModel::new(IdealMixture::new(3));
        let feed = Feed::new(vec![1.0, 2.0, 3.0]).unwrap();
        let obj = GibbsObjective::new(&model, pa(1e5), k(300.0), &feed, 4, DEFAULT_SENTINEL);
        assert_eq!(obj.dim(), 9);

        let _ = obj.evaluate(&[0.5; 9]);
        assert_eq!(model.evaluations(), 4);
    }

    #[test]
    fn wrong_length_is_sentinel_not_panic() {
        let model = IdealMixture::new(2);
        let feed = Feed::new(vec![1.0, 1.0]).unwrap();
        let obj = GibbsObjective::new(&model, pa(1e5), k(300.0), &feed, 2, 7.0);
        assert_eq!(obj.evaluate(&[0.5]), 7.0);
    }

    #[test]
    fn matrix_form_matches_vector_form() {
        let model = IdealMixture::with_standard_potentials(vec![-1000.0, 500.0]).unwrap();
        let feed = Feed::new(vec![0.4, 1.6]).unwrap();
        let (p, t) = (pa(1e5), k(310.0));
        let obj = GibbsObjective::new(&model, p, t, &feed, 3, DEFAULT_SENTINEL);

        let x = [0.3, 0.8, 0.6, 0.2];
        let dividers = codec::dividers_from_vector(&x, 3, 2).unwrap();
        let from_matrix = evaluate(&model, p, t, feed.amounts(), &dividers, DEFAULT_SENTINEL);
        assert!((obj.evaluate(&x) - from_matrix).abs() < 1e-14);

        let bad = DMatrix::zeros(1, 5);
        assert_eq!(
            evaluate(&model, p, t, feed.amounts(), &bad, DEFAULT_SENTINEL),
            DEFAULT_SENTINEL
        );
    }
}
