//! Adapters that turn closures into models and instrument existing models.

use crate::model::GibbsModel;
use gf_core::Real;
use gf_core::timing::AccumulatingTimer;
use gf_core::units::{Pressure, Temperature};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Model backed by a closure `f(p [Pa], T [K], moles [mol]) -> G [J]`.
///
/// Useful for stub evaluators and for wrapping external libraries that do
/// not implement [`GibbsModel`] themselves.
pub struct FnModel<F> {
    name: String,
    num_species: usize,
    f: F,
}

impl<F> FnModel<F>
where
    F: Fn(Real, Real, &[Real]) -> Real + Send + Sync,
{
    pub fn new(name: impl Into<String>, num_species: usize, f: F) -> Self {
        Self {
            name: name.into(),
            num_species,
            f,
        }
    }
}

impl<F> GibbsModel for FnModel<F>
where
    F: Fn(Real, Real, &[Real]) -> Real + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn num_species(&self) -> usize {
        self.num_species
    }

    fn gibbs_energy(&self, p: Pressure, t: Temperature, moles: &[Real]) -> Real {
        (self.f)(p.value, t.value, moles)
    }
}

/// Wraps a model and counts evaluations, failed (non-finite) results and
/// time spent inside the wrapped model.
///
/// Counters are atomics so the wrapper stays `Sync` under parallel evaluation.
pub struct CountingModel<M> {
    inner: M,
    failures: AtomicU64,
    timer: AccumulatingTimer,
}

impl<M: GibbsModel> CountingModel<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            failures: AtomicU64::new(0),
            timer: AccumulatingTimer::new(),
        }
    }

    /// Number of Gibbs energy evaluations so far.
    pub fn evaluations(&self) -> u64 {
        self.timer.count()
    }

    /// Number of evaluations that returned a non-finite value.
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Total time spent in the wrapped model [s].
    pub fn total_seconds(&self) -> f64 {
        self.timer.total_seconds()
    }

    /// Average time per evaluation [s].
    pub fn average_seconds(&self) -> f64 {
        self.timer.average_seconds()
    }

    pub fn reset(&self) {
        self.failures.store(0, Ordering::Relaxed);
        self.timer.reset();
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: GibbsModel> GibbsModel for CountingModel<M> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn num_species(&self) -> usize {
        self.inner.num_species()
    }

    fn gibbs_energy(&self, p: Pressure, t: Temperature, moles: &[Real]) -> Real {
        let start = Instant::now();
        let g = self.inner.gibbs_energy(p, t, moles);
        self.timer.record(start.elapsed().as_secs_f64());
        if !g.is_finite() {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
        g
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ideal::IdealMixture;
    use gf_core::units::{k, pa};

    #[test]
    fn fn_model_forwards_si_values() {
        let model = FnModel::new("echo", 2, |p, t, n: &[Real]| p + t + n.iter().sum::<Real>());
        assert_eq!(model.name(), "echo");
        assert_eq!(model.num_species(), 2);
        let g = model.gibbs_energy(pa(100.0), k(300.0), &[1.0, 2.0]);
        assert!((g - 403.0).abs() < 1e-12);
    }

    #[test]
    fn counting_model_tracks_failures() {
        let model = CountingModel::new(IdealMixture::new(2));
        let t = k(300.0);
        let _ = model.gibbs_energy(pa(1e5), t, &[1.0, 1.0]);
        let _ = model.gibbs_energy(pa(1e5), t, &[-1.0, 1.0]);
        let _ = model.gibbs_energy(pa(1e5), t, &[0.5, 0.0]);
        assert_eq!(model.evaluations(), 3);
        assert_eq!(model.failures(), 1);

        model.reset();
        assert_eq!(model.evaluations(), 0);
        assert_eq!(model.failures(), 0);
    }
}
