//! Partition codec: decision vector <-> phase allocation.
//!
//! A partition of the feed over `P` phases is encoded by a `(P-1) x S` matrix
//! of dividers in the open unit interval. For species `j`, phase 0 receives
//! `d[0][j] * n[j]`, phase `i` receives `d[i][j]` times what phases `0..i`
//! left over, and the last phase receives the remainder. Each divider is a
//! fraction *of what is left*, so distinct divider matrices map to distinct
//! allocations and every allocation has non-negative entries with column
//! sums equal to the feed.
//!
//! The optimizer works with a flat vector; it is laid out phase-major
//! (`x[i * S + j]` is divider `(i, j)`).

use crate::error::{FlashError, FlashResult};
use gf_core::Real;
use nalgebra::DMatrix;

/// Phase allocation and the mole fractions derived from it.
#[derive(Clone, Debug, PartialEq)]
pub struct PhasePartition {
    /// Moles of species `j` in phase `i` at `(i, j)`.
    pub allocation: DMatrix<Real>,
    /// Mole fractions; rows of empty phases are `NaN`.
    pub composition: DMatrix<Real>,
}

impl PhasePartition {
    /// Build from an allocation, normalising rows into mole fractions.
    pub fn from_allocation(allocation: DMatrix<Real>) -> Self {
        let composition = mole_fractions(&allocation);
        Self {
            allocation,
            composition,
        }
    }

    pub fn num_phases(&self) -> usize {
        self.allocation.nrows()
    }

    pub fn num_species(&self) -> usize {
        self.allocation.ncols()
    }

    /// Total moles in each phase.
    pub fn phase_totals(&self) -> Vec<Real> {
        self.allocation.row_iter().map(|row| row.sum()).collect()
    }

    /// True when phase `i` holds no material (its composition is undefined).
    pub fn is_empty_phase(&self, i: usize) -> bool {
        self.allocation.row(i).sum() == 0.0
    }
}

/// Length of the decision vector for `num_phases` phases and `num_species` species.
pub fn decision_len(num_phases: usize, num_species: usize) -> usize {
    num_phases.saturating_sub(1) * num_species
}

/// Decode a `(P-1) x S` divider matrix against the feed `total`.
///
/// Dividers are expected in `[0, 1]`; keeping them there is the optimizer's
/// job (its box bounds), not the codec's.
pub fn decode(dividers: &DMatrix<Real>, total: &[Real]) -> FlashResult<PhasePartition> {
    if dividers.nrows() == 0 {
        return Err(FlashError::InvalidInput {
            what: "divider matrix needs at least one row (two phases)".to_string(),
        });
    }
    if dividers.ncols() != total.len() {
        return Err(FlashError::InvalidInput {
            what: format!(
                "divider matrix has {} columns, feed has {} species",
                dividers.ncols(),
                total.len()
            ),
        });
    }

    let mut allocation = DMatrix::zeros(dividers.nrows() + 1, total.len());
    fill_allocation(|i, j| dividers[(i, j)], total, &mut allocation);
    Ok(PhasePartition::from_allocation(allocation))
}

/// Decode a flat, phase-major decision vector.
pub fn decode_vector(x: &[Real], total: &[Real], num_phases: usize) -> FlashResult<PhasePartition> {
    Ok(PhasePartition::from_allocation(allocation_from_vector(
        x, total, num_phases,
    )?))
}

/// Reshape a flat decision vector into the `(P-1) x S` divider matrix.
pub fn dividers_from_vector(
    x: &[Real],
    num_phases: usize,
    num_species: usize,
) -> FlashResult<DMatrix<Real>> {
    check_vector_len(x, num_phases, num_species)?;
    Ok(DMatrix::from_row_slice(num_phases - 1, num_species, x))
}

/// Allocation only (no mole fractions) from a flat decision vector.
pub fn allocation_from_vector(
    x: &[Real],
    total: &[Real],
    num_phases: usize,
) -> FlashResult<DMatrix<Real>> {
    let ns = total.len();
    check_vector_len(x, num_phases, ns)?;
    let mut allocation = DMatrix::zeros(num_phases, ns);
    fill_allocation(|i, j| x[i * ns + j], total, &mut allocation);
    Ok(allocation)
}

/// Nested-interval allocation into a preallocated `P x S` buffer.
///
/// `divider(i, j)` returns the divider of phase `i < P-1` for species `j`.
/// Species are independent of each other.
pub(crate) fn fill_allocation<D>(divider: D, total: &[Real], allocation: &mut DMatrix<Real>)
where
    D: Fn(usize, usize) -> Real,
{
    let last = allocation.nrows() - 1;
    for (j, n) in total.iter().enumerate() {
        let mut remaining = *n;
        for i in 0..last {
            let share = divider(i, j) * remaining;
            allocation[(i, j)] = share;
            remaining -= share;
        }
        allocation[(last, j)] = remaining;
    }
}

/// Row-normalise an allocation into mole fractions.
///
/// A row with zero total has no composition; it is filled with `NaN` and
/// callers read it as "phase absent".
pub fn mole_fractions(allocation: &DMatrix<Real>) -> DMatrix<Real> {
    let mut fractions = allocation.clone();
    for mut row in fractions.row_iter_mut() {
        let sum = row.sum();
        if sum > 0.0 {
            row /= sum;
        } else {
            row.fill(Real::NAN);
        }
    }
    fractions
}

fn check_vector_len(x: &[Real], num_phases: usize, num_species: usize) -> FlashResult<()> {
    if num_phases < 2 {
        return Err(FlashError::InvalidInput {
            what: format!("need at least two phases, got {}", num_phases),
        });
    }
    let expected = decision_len(num_phases, num_species);
    if x.len() != expected {
        return Err(FlashError::InvalidInput {
            what: format!(
                "decision vector has {} entries, expected {}",
                x.len(),
                expected
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_species_two_phases() {
        let p = decode(&DMatrix::from_element(1, 1, 0.25), &[4.0]).unwrap();
        assert_eq!(p.allocation[(0, 0)], 1.0);
        assert_eq!(p.allocation[(1, 0)], 3.0);
        assert_eq!(p.composition[(0, 0)], 1.0);
    }

    #[test]
    fn distinct_dividers_give_distinct_allocations() {
        let a = decode(&DMatrix::from_element(1, 1, 0.3), &[2.0]).unwrap();
        let b = decode(&DMatrix::from_element(1, 1, 0.7), &[2.0]).unwrap();
        assert_ne!(a.allocation, b.allocation);
        assert!((a.allocation[(0, 0)] - 0.6).abs() < 1e-15);
        assert!((b.allocation[(0, 0)] - 1.4).abs() < 1e-15);
    }

    #[test]
    fn dividers_are_fractions_of_remainder() {
        // three phases, one species: 0.5 of 8 -> 4, 0.5 of remaining 4 -> 2, rest 2
        let p = decode(&DMatrix::from_column_slice(2, 1, &[0.5, 0.5]), &[8.0]).unwrap();
        assert_eq!(p.phase_totals(), vec![4.0, 2.0, 2.0]);
    }

    #[test]
    fn vector_layout_is_phase_major() {
        // P = 3, S = 2: x = [d00, d01, d10, d11]
        let x = [0.5, 0.25, 0.5, 1.0];
        let m = dividers_from_vector(&x, 3, 2).unwrap();
        assert_eq!(m[(0, 1)], 0.25);
        assert_eq!(m[(1, 0)], 0.5);

        let from_vec = decode_vector(&x, &[2.0, 4.0], 3).unwrap();
        let from_mat = decode(&m, &[2.0, 4.0]).unwrap();
        assert_eq!(from_vec, from_mat);
        // species 1: 1.0 to phase 0, all of remaining 3.0 to phase 1, none left
        assert_eq!(from_vec.allocation[(1, 1)], 3.0);
        assert_eq!(from_vec.allocation[(2, 1)], 0.0);
    }

    #[test]
    fn empty_phase_has_undefined_composition() {
        // everything goes to phase 0
        let p = decode(&DMatrix::from_element(1, 2, 1.0), &[1.0, 3.0]).unwrap();
        assert!(p.is_empty_phase(1));
        assert!(p.composition.row(1).iter().all(|x| x.is_nan()));
        assert!((p.composition[(0, 0)] - 0.25).abs() < 1e-15);
    }

    #[test]
    fn shape_errors() {
        assert!(decode(&DMatrix::zeros(0, 2), &[1.0, 1.0]).is_err());
        assert!(decode(&DMatrix::zeros(1, 3), &[1.0, 1.0]).is_err());
        assert!(dividers_from_vector(&[0.5; 3], 3, 2).is_err());
        assert!(allocation_from_vector(&[], &[1.0], 1).is_err());
        assert_eq!(decision_len(4, 3), 9);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use gf_core::numeric::{Tolerances, nearly_equal};
    use proptest::prelude::*;

    fn case() -> impl Strategy<Value = (usize, Vec<Real>, Vec<Real>)> {
        (2usize..6, 1usize..6).prop_flat_map(|(np, ns)| {
            (
                Just(np),
                prop::collection::vec(0.0_f64..50.0, ns),
                prop::collection::vec(1e-9_f64..(1.0 - 1e-9), (np - 1) * ns),
            )
        })
    }

    proptest! {
        #[test]
        fn column_sums_equal_feed((np, total, x) in case()) {
            let alloc = allocation_from_vector(&x, &total, np).unwrap();
            let tol = Tolerances { abs: 1e-12, rel: 1e-12 };
            for (j, n) in total.iter().enumerate() {
                prop_assert!(nearly_equal(alloc.column(j).sum(), *n, tol));
            }
            prop_assert!(alloc.iter().all(|a| *a >= 0.0));
        }

        #[test]
        fn positive_rows_normalise_to_one((np, total, x) in case()) {
            let partition = decode_vector(&x, &total, np).unwrap();
            let tol = Tolerances { abs: 1e-12, rel: 1e-12 };
            for (i, t) in partition.phase_totals().iter().enumerate() {
                if *t > 0.0 {
                    prop_assert!(nearly_equal(partition.composition.row(i).sum(), 1.0, tol));
                }
            }
        }

        #[test]
        fn binary_split_is_injective(a in 1e-6_f64..0.999, b in 1e-6_f64..0.999, n in 1e-3_f64..100.0) {
            prop_assume!((a - b).abs() > 1e-9);
            let pa = decode_vector(&[a], &[n], 2).unwrap();
            let pb = decode_vector(&[b], &[n], 2).unwrap();
            prop_assert!(pa.allocation[(0, 0)] != pb.allocation[(0, 0)]);
            prop_assert!((pa.allocation[(0, 0)] - a * n).abs() <= 1e-12 * n);
            prop_assert!((pa.allocation[(1, 0)] - (n - a * n)).abs() <= 1e-12 * n);
        }
    }
}
