//! Gibbs energy model trait and validation helpers.

use gf_core::Real;
use gf_core::units::{Pressure, Temperature};
use std::sync::Arc;

/// Trait for equation-of-state evaluators used by the flash engine.
///
/// Implementations must be thread-safe (Send + Sync) so that candidate
/// partitions can be evaluated in parallel. Evaluation must be a pure
/// function of its arguments.
pub trait GibbsModel: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Number of species the model is parameterised for.
    fn num_species(&self) -> usize;

    /// Total Gibbs energy [J] of one phase holding `moles` [mol] of each
    /// species at pressure `p` and temperature `t`.
    ///
    /// The model solves for the phase volume internally if it needs one.
    /// When no physical state exists for the inputs, or the inputs are
    /// themselves non-physical, the result is `NaN`. Implementations must
    /// not panic for any finite input, including an all-zero phase.
    fn gibbs_energy(&self, p: Pressure, t: Temperature, moles: &[Real]) -> Real;
}

impl<M: GibbsModel + ?Sized> GibbsModel for &M {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn num_species(&self) -> usize {
        (**self).num_species()
    }

    fn gibbs_energy(&self, p: Pressure, t: Temperature, moles: &[Real]) -> Real {
        (**self).gibbs_energy(p, t, moles)
    }
}

impl<M: GibbsModel + ?Sized> GibbsModel for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn num_species(&self) -> usize {
        (**self).num_species()
    }

    fn gibbs_energy(&self, p: Pressure, t: Temperature, moles: &[Real]) -> Real {
        (**self).gibbs_energy(p, t, moles)
    }
}

impl<M: GibbsModel + ?Sized> GibbsModel for Arc<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn num_species(&self) -> usize {
        (**self).num_species()
    }

    fn gibbs_energy(&self, p: Pressure, t: Temperature, moles: &[Real]) -> Real {
        (**self).gibbs_energy(p, t, moles)
    }
}

/// Validation helpers for state variables.
pub mod validation {
    use super::*;
    use crate::error::{EosError, EosResult};

    /// Ensure pressure is positive and finite.
    pub fn validate_pressure(p: Pressure) -> EosResult<()> {
        if !p.value.is_finite() || p.value <= 0.0 {
            return Err(EosError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure temperature is positive and finite.
    pub fn validate_temperature(t: Temperature) -> EosResult<()> {
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(EosError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure an input vector matches the model's species count.
    pub fn validate_species_count<M: GibbsModel + ?Sized>(
        model: &M,
        found: usize,
    ) -> EosResult<()> {
        let expected = model.num_species();
        if expected != found {
            return Err(EosError::SpeciesMismatch { expected, found });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;
    use crate::ideal::IdealMixture;
    use gf_core::units::{k, pa};

    #[test]
    fn validate_positive_pressure() {
        assert!(validate_pressure(pa(101325.0)).is_ok());
        assert!(validate_pressure(pa(-100.0)).is_err());
        assert!(validate_pressure(pa(0.0)).is_err());
        assert!(validate_pressure(pa(f64::NAN)).is_err());
    }

    #[test]
    fn validate_positive_temperature() {
        assert!(validate_temperature(k(300.0)).is_ok());
        assert!(validate_temperature(k(-10.0)).is_err());
        assert!(validate_temperature(k(0.0)).is_err());
        assert!(validate_temperature(k(f64::INFINITY)).is_err());
    }

    #[test]
    fn species_count_mismatch() {
        let model = IdealMixture::new(3);
        assert!(validate_species_count(&model, 3).is_ok());
        assert!(validate_species_count(&model, 2).is_err());
    }

    #[test]
    fn smart_pointers_forward() {
        let model = IdealMixture::new(2);
        let boxed: Box<dyn GibbsModel> = Box::new(model.clone());
        let shared: Arc<dyn GibbsModel> = Arc::new(model.clone());
        let n = [0.3, 0.7];
        let direct = model.gibbs_energy(pa(1e5), k(300.0), &n);
        assert_eq!(boxed.gibbs_energy(pa(1e5), k(300.0), &n), direct);
        assert_eq!(shared.gibbs_energy(pa(1e5), k(300.0), &n), direct);
        assert_eq!(boxed.num_species(), 2);
        assert_eq!(shared.name(), model.name());
    }
}
