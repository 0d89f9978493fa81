//! Reference Gibbs energy models.
//!
//! Both models are pressure independent (condensed-phase solution models).
//! They are cheap, analytic and have known phase behaviour, which makes them
//! the workhorses of the flash tests.

use crate::error::{EosError, EosResult};
use crate::model::GibbsModel;
use gf_core::Real;
use gf_core::numeric::xlnx;
use gf_core::units::constants::rt;
use gf_core::units::{Pressure, Temperature};

/// Ideal solution: `G = Σ nᵢ μ°ᵢ + RT Σ nᵢ ln xᵢ`.
///
/// Never splits: any partition of a feed has a Gibbs energy at least as
/// large as the homogeneous mixture.
#[derive(Debug, Clone, PartialEq)]
pub struct IdealMixture {
    /// Pure-species chemical potentials [J/mol].
    standard_potentials: Vec<Real>,
}

impl IdealMixture {
    /// Ideal mixture with all standard potentials set to zero.
    pub fn new(num_species: usize) -> Self {
        Self {
            standard_potentials: vec![0.0; num_species],
        }
    }

    /// Ideal mixture with the given standard chemical potentials [J/mol].
    pub fn with_standard_potentials(standard_potentials: Vec<Real>) -> EosResult<Self> {
        if standard_potentials.is_empty() {
            return Err(EosError::InvalidArg {
                what: "no species given",
            });
        }
        if standard_potentials.iter().any(|mu| !mu.is_finite()) {
            return Err(EosError::NonPhysical {
                what: "standard potential must be finite",
            });
        }
        Ok(Self {
            standard_potentials,
        })
    }

    pub fn standard_potentials(&self) -> &[Real] {
        &self.standard_potentials
    }

    /// Returns (total moles, G) or `None` for non-physical input.
    fn evaluate(&self, t_k: Real, moles: &[Real]) -> Option<(Real, Real)> {
        if moles.len() != self.standard_potentials.len() {
            return None;
        }
        if moles.iter().any(|n| !n.is_finite() || *n < 0.0) {
            return None;
        }

        let total: Real = moles.iter().sum();
        if total == 0.0 {
            return Some((0.0, 0.0));
        }

        let reference: Real = moles
            .iter()
            .zip(&self.standard_potentials)
            .map(|(n, mu)| n * mu)
            .sum();
        let mixing: Real = moles.iter().map(|n| xlnx(n / total)).sum();
        Some((total, reference + rt(t_k) * total * mixing))
    }
}

impl GibbsModel for IdealMixture {
    fn name(&self) -> &str {
        "ideal-mixture"
    }

    fn num_species(&self) -> usize {
        self.standard_potentials.len()
    }

    fn gibbs_energy(&self, _p: Pressure, t: Temperature, moles: &[Real]) -> Real {
        match self.evaluate(t.value, moles) {
            Some((_, g)) => g,
            None => Real::NAN,
        }
    }
}

/// Regular solution (two-suffix Margules) on top of an ideal mixture:
/// `G = G_ideal + RT Σ_{i<j} Aᵢⱼ nᵢ nⱼ / N`.
///
/// Interaction parameters `Aᵢⱼ` are dimensionless (in units of RT). For a
/// symmetric binary the mixture splits into two liquids when `A > 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularSolution {
    ideal: IdealMixture,
    interaction: Vec<Vec<Real>>,
}

impl RegularSolution {
    /// Create from a symmetric interaction matrix. Diagonal entries are ignored.
    pub fn new(ideal: IdealMixture, interaction: Vec<Vec<Real>>) -> EosResult<Self> {
        let n = ideal.num_species();
        if interaction.len() != n {
            return Err(EosError::SpeciesMismatch {
                expected: n,
                found: interaction.len(),
            });
        }
        for row in &interaction {
            if row.len() != n {
                return Err(EosError::SpeciesMismatch {
                    expected: n,
                    found: row.len(),
                });
            }
            if row.iter().any(|a| !a.is_finite()) {
                return Err(EosError::NonPhysical {
                    what: "interaction parameter must be finite",
                });
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if interaction[i][j] != interaction[j][i] {
                    return Err(EosError::InvalidArg {
                        what: "interaction matrix must be symmetric",
                    });
                }
            }
        }
        Ok(Self { ideal, interaction })
    }

    /// Symmetric binary with a single interaction parameter `a`.
    pub fn symmetric_binary(a: Real) -> EosResult<Self> {
        Self::new(IdealMixture::new(2), vec![vec![0.0, a], vec![a, 0.0]])
    }

    /// Interaction parameter `Aᵢⱼ`, `None` for an out-of-range index.
    pub fn interaction(&self, i: usize, j: usize) -> Option<Real> {
        self.interaction.get(i)?.get(j).copied()
    }
}

impl GibbsModel for RegularSolution {
    fn name(&self) -> &str {
        "regular-solution"
    }

    fn num_species(&self) -> usize {
        self.ideal.num_species()
    }

    fn gibbs_energy(&self, _p: Pressure, t: Temperature, moles: &[Real]) -> Real {
        let Some((total, g_ideal)) = self.ideal.evaluate(t.value, moles) else {
            return Real::NAN;
        };
        if total == 0.0 {
            return 0.0;
        }

        let mut excess = 0.0;
        for i in 0..moles.len() {
            for j in (i + 1)..moles.len() {
                excess += self.interaction[i][j] * moles[i] * moles[j];
            }
        }
        g_ideal + rt(t.value) * excess / total
    }
}
