//! Differential evolution (DE/rand/1/bin) with budgeted stopping.

use crate::bounds::Bounds;
use crate::error::{OptimError, OptimResult};
use gf_core::timing::Deadline;
use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Differential evolution configuration.
#[derive(Clone, Debug)]
pub struct DeConfig {
    /// Number of candidates per generation
    pub population_size: usize,
    /// Hard cap on objective evaluations
    pub max_evaluations: usize,
    /// Wall-clock limit (None = unbounded)
    pub time_limit: Option<Duration>,
    /// RNG seed; identical seeds reproduce the candidate sequence
    pub seed: u64,
    /// Mutation scale factor F
    pub differential_weight: f64,
    /// Binomial crossover probability CR
    pub crossover_rate: f64,
    /// Evaluate each generation on the rayon thread pool
    pub parallel: bool,
}

impl Default for DeConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_evaluations: 10_000,
            time_limit: None,
            seed: 0,
            differential_weight: 0.7,
            crossover_rate: 0.9,
            parallel: false,
        }
    }
}

impl DeConfig {
    pub fn validate(&self) -> OptimResult<()> {
        if self.population_size < 4 {
            return Err(OptimError::InvalidConfig {
                what: format!(
                    "population size must be at least 4, got {}",
                    self.population_size
                ),
            });
        }
        if self.max_evaluations == 0 {
            return Err(OptimError::InvalidConfig {
                what: "evaluation budget must be at least 1".to_string(),
            });
        }
        if !(self.differential_weight > 0.0 && self.differential_weight <= 2.0) {
            return Err(OptimError::InvalidConfig {
                what: format!(
                    "differential weight must be in (0, 2], got {}",
                    self.differential_weight
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(OptimError::InvalidConfig {
                what: format!(
                    "crossover rate must be in [0, 1], got {}",
                    self.crossover_rate
                ),
            });
        }
        Ok(())
    }
}

/// Why the search stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    EvaluationBudget,
    TimeLimit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EvaluationBudget => write!(f, "evaluation budget exhausted"),
            Self::TimeLimit => write!(f, "time limit reached"),
        }
    }
}

/// Search result.
#[derive(Clone, Debug)]
pub struct DeResult {
    /// Best candidate found
    pub x: DVector<f64>,
    /// Objective value at `x` (NaN values are reported as +inf)
    pub value: f64,
    /// Number of objective evaluations performed
    pub evaluations: usize,
    /// Number of completed generations after the initial population
    pub generations: usize,
    /// Wall-clock time spent
    pub elapsed: Duration,
    /// Stopping condition that fired
    pub stop: StopReason,
}

/// Seeded differential evolution minimizer.
#[derive(Clone, Debug, Default)]
pub struct DifferentialEvolution {
    config: DeConfig,
}

impl DifferentialEvolution {
    pub fn new(config: DeConfig) -> OptimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DeConfig {
        &self.config
    }

    /// Minimize `objective` over `bounds`.
    ///
    /// Trial vectors are generated from the seeded RNG before any of them is
    /// evaluated, so the candidate sequence does not depend on whether the
    /// generation is evaluated sequentially or in parallel.
    pub fn minimize<F>(&self, objective: F, bounds: &Bounds) -> OptimResult<DeResult>
    where
        F: Fn(&[f64]) -> f64 + Sync,
    {
        let cfg = &self.config;
        let deadline = Deadline::start(cfg.time_limit);
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let mut evaluations = 0usize;

        let initial: Vec<DVector<f64>> = (0..cfg.population_size.min(cfg.max_evaluations))
            .map(|_| bounds.sample(&mut rng))
            .collect();
        let scores = self.evaluate_batch(&objective, &initial, &deadline, true);
        let mut population = Vec::with_capacity(initial.len());
        let mut fitness = Vec::with_capacity(initial.len());
        for (x, score) in initial.into_iter().zip(scores) {
            if let Some(value) = score {
                population.push(x);
                fitness.push(value);
            }
        }
        evaluations += fitness.len();

        let mut best = best_index(&fitness);
        let mut generations = 0usize;

        let stop = loop {
            if evaluations >= cfg.max_evaluations {
                break StopReason::EvaluationBudget;
            }
            if deadline.expired() {
                break StopReason::TimeLimit;
            }
            // Only reachable when the clock cut the initial population short.
            if population.len() < 4 {
                break StopReason::TimeLimit;
            }

            let remaining = cfg.max_evaluations - evaluations;
            let trials: Vec<DVector<f64>> = (0..population.len().min(remaining))
                .map(|i| self.trial_vector(i, &population, bounds, &mut rng))
                .collect();

            let scores = self.evaluate_batch(&objective, &trials, &deadline, false);
            let mut truncated = false;

            for (i, (trial, score)) in trials.into_iter().zip(scores).enumerate() {
                let Some(value) = score else {
                    truncated = true;
                    continue;
                };
                evaluations += 1;
                if value <= fitness[i] {
                    population[i] = trial;
                    fitness[i] = value;
                    if value < fitness[best] {
                        best = i;
                    }
                }
            }
            generations += 1;

            debug!(
                generation = generations,
                evaluations,
                best = fitness[best],
                "differential evolution generation"
            );

            if truncated {
                break StopReason::TimeLimit;
            }
        };

        let elapsed = deadline.elapsed();
        info!(
            evaluations,
            generations,
            best = fitness[best],
            elapsed_s = elapsed.as_secs_f64(),
            %stop,
            "differential evolution finished"
        );

        Ok(DeResult {
            x: population[best].clone(),
            value: fitness[best],
            evaluations,
            generations,
            elapsed,
            stop,
        })
    }

    /// Build the DE/rand/1/bin trial for population member `i`.
    fn trial_vector(
        &self,
        i: usize,
        population: &[DVector<f64>],
        bounds: &Bounds,
        rng: &mut StdRng,
    ) -> DVector<f64> {
        let np = population.len();
        let dim = bounds.dim();
        let [r1, r2, r3] = distinct_donors(i, np, rng);

        let target = &population[i];
        let forced = rng.random_range(0..dim);
        let mut trial = target.clone();
        for j in 0..dim {
            if j == forced || rng.random::<f64>() < self.config.crossover_rate {
                let v = population[r1][j]
                    + self.config.differential_weight * (population[r2][j] - population[r3][j]);
                trial[j] = repair(v, target[j], bounds.lower()[j], bounds.upper()[j], rng);
            }
        }
        bounds.clamp(&mut trial);
        trial
    }

    /// Evaluate candidates, skipping those reached after the deadline.
    ///
    /// Entry `i` is `None` when candidate `i` was skipped. The deadline is
    /// checked before every evaluation in both modes, so a parallel batch
    /// overruns by at most one evaluation per worker thread. With
    /// `force_first`, candidate 0 is always evaluated so that a result exists.
    fn evaluate_batch<F>(
        &self,
        objective: &F,
        candidates: &[DVector<f64>],
        deadline: &Deadline,
        force_first: bool,
    ) -> Vec<Option<f64>>
    where
        F: Fn(&[f64]) -> f64 + Sync,
    {
        let score = |i: usize, x: &DVector<f64>| {
            if deadline.expired() && !(force_first && i == 0) {
                None
            } else {
                Some(sanitize(objective(x.as_slice())))
            }
        };

        if self.config.parallel {
            candidates
                .par_iter()
                .enumerate()
                .map(|(i, x)| score(i, x))
                .collect()
        } else {
            candidates
                .iter()
                .enumerate()
                .map(|(i, x)| score(i, x))
                .collect()
        }
    }
}

/// Convenience wrapper: validate `config` and run one search.
pub fn minimize<F>(objective: F, bounds: &Bounds, config: DeConfig) -> OptimResult<DeResult>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    DifferentialEvolution::new(config)?.minimize(objective, bounds)
}

/// NaN never wins a comparison; map it to +inf so selection stays total.
fn sanitize(value: f64) -> f64 {
    if value.is_nan() { f64::INFINITY } else { value }
}

fn best_index(fitness: &[f64]) -> usize {
    let mut best = 0;
    for (i, f) in fitness.iter().enumerate() {
        if *f < fitness[best] {
            best = i;
        }
    }
    best
}

/// Three mutually distinct population indices, all different from `i`.
fn distinct_donors(i: usize, np: usize, rng: &mut StdRng) -> [usize; 3] {
    let mut picks = [usize::MAX; 3];
    let mut n = 0;
    while n < 3 {
        let r = rng.random_range(0..np);
        if r != i && !picks[..n].contains(&r) {
            picks[n] = r;
            n += 1;
        }
    }
    picks
}

/// Bring a mutated coordinate back into `[lo, hi]` by resampling between the
/// parent coordinate and the violated edge.
fn repair(v: f64, parent: f64, lo: f64, hi: f64, rng: &mut StdRng) -> f64 {
    if v < lo {
        lo + rng.random::<f64>() * (parent - lo)
    } else if v > hi {
        hi - rng.random::<f64>() * (hi - parent)
    } else {
        v
    }
}
