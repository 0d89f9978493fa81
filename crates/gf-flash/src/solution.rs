//! Flash result and post-hoc diagnostics.

use crate::codec::PhasePartition;
use gf_core::Real;
use gf_optim::StopReason;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of one flash call. Built once after the search, never mutated.
#[derive(Clone, Debug)]
pub struct FlashSolution {
    pub(crate) partition: PhasePartition,
    pub(crate) objective: Real,
    pub(crate) evaluations: usize,
    pub(crate) elapsed: Duration,
    pub(crate) stop: StopReason,
}

impl FlashSolution {
    /// Mole fractions, one row per phase. Rows of empty phases are `NaN`.
    pub fn composition(&self) -> &DMatrix<Real> {
        &self.partition.composition
    }

    /// Moles of each species in each phase.
    pub fn allocation(&self) -> &DMatrix<Real> {
        &self.partition.allocation
    }

    pub fn partition(&self) -> &PhasePartition {
        &self.partition
    }

    pub fn num_phases(&self) -> usize {
        self.partition.num_phases()
    }

    /// Achieved `G / (R T N)`.
    pub fn objective(&self) -> Real {
        self.objective
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn stop(&self) -> StopReason {
        self.stop
    }

    /// Total moles per phase.
    pub fn phase_amounts(&self) -> Vec<Real> {
        self.partition.phase_totals()
    }

    /// Phase fractions `N_i / N` (sum to one).
    pub fn phase_fractions(&self) -> Vec<Real> {
        let amounts = self.phase_amounts();
        let total: Real = amounts.iter().sum();
        amounts.iter().map(|n| n / total).collect()
    }

    /// Indices of phases whose phase fraction exceeds `min_fraction`.
    pub fn present_phases(&self, min_fraction: Real) -> Vec<usize> {
        self.phase_fractions()
            .iter()
            .enumerate()
            .filter(|(_, beta)| **beta > min_fraction)
            .map(|(i, _)| i)
            .collect()
    }

    /// Pairs of phases `(i, j)`, `i < j`, whose mole fractions agree within
    /// `tol` for every species. Empty phases are never paired.
    ///
    /// A non-empty result hints that fewer phases exist than were assumed.
    pub fn collapsed_pairs(&self, tol: Real) -> Vec<(usize, usize)> {
        let x = &self.partition.composition;
        let mut pairs = Vec::new();
        for i in 0..x.nrows() {
            for j in (i + 1)..x.nrows() {
                if self.partition.is_empty_phase(i) || self.partition.is_empty_phase(j) {
                    continue;
                }
                let close = x
                    .row(i)
                    .iter()
                    .zip(x.row(j).iter())
                    .all(|(a, b)| (a - b).abs() <= tol);
                if close {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    /// Serializable summary.
    pub fn report(&self) -> FlashReport {
        FlashReport {
            objective: self.objective,
            phase_fractions: self.phase_fractions(),
            compositions: (0..self.num_phases())
                .map(|i| {
                    (!self.partition.is_empty_phase(i))
                        .then(|| self.partition.composition.row(i).iter().copied().collect())
                })
                .collect(),
            allocation: rows(&self.partition.allocation),
            evaluations: self.evaluations,
            elapsed_s: self.elapsed.as_secs_f64(),
            stop: self.stop.to_string(),
        }
    }
}

/// Plain-data snapshot of a [`FlashSolution`] for logging and export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlashReport {
    pub objective: Real,
    pub phase_fractions: Vec<Real>,
    /// `None` for empty phases.
    pub compositions: Vec<Option<Vec<Real>>>,
    pub allocation: Vec<Vec<Real>>,
    pub evaluations: usize,
    pub elapsed_s: f64,
    pub stop: String,
}

fn rows(m: &DMatrix<Real>) -> Vec<Vec<Real>> {
    m.row_iter().map(|r| r.iter().copied().collect()).collect()
}
