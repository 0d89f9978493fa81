//! Flash configuration.

use crate::error::{FlashError, FlashResult};
use crate::objective::DEFAULT_SENTINEL;
use gf_core::Real;
use gf_optim::DeConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Evaluation budget per assumed phase when none is given.
pub const DEFAULT_EVALUATIONS_PER_PHASE: usize = 4_000;

/// Smallest accepted sentinel. Failed evaluations must rank below every
/// feasible partition, so the sentinel has to sit well above any realistic
/// `G / (R T N)`.
pub const MIN_SENTINEL: Real = 1e6;

/// Settings for one flash call. Immutable for the duration of the call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashConfig {
    /// Assumed number of phases (>= 2)
    pub num_phases: usize,
    /// Objective evaluation budget (None = scale with `num_phases`)
    pub max_evaluations: Option<usize>,
    /// Optimizer population size
    pub population_size: usize,
    /// Wall-clock limit (None = unbounded)
    pub time_limit: Option<Duration>,
    /// Optimizer seed
    pub seed: u64,
    /// Objective value substituted for failed evaluations (>= `MIN_SENTINEL`)
    pub sentinel: Real,
    /// Evaluate candidates of a generation concurrently
    pub parallel: bool,
    /// Differential evolution mutation factor
    pub differential_weight: Real,
    /// Differential evolution crossover probability
    pub crossover_rate: Real,
}

impl Default for FlashConfig {
    fn default() -> Self {
        let de = DeConfig::default();
        Self {
            num_phases: 2,
            max_evaluations: None,
            population_size: de.population_size,
            time_limit: None,
            seed: de.seed,
            sentinel: DEFAULT_SENTINEL,
            parallel: false,
            differential_weight: de.differential_weight,
            crossover_rate: de.crossover_rate,
        }
    }
}

impl FlashConfig {
    /// Defaults with the given phase count.
    pub fn new(num_phases: usize) -> Self {
        Self {
            num_phases,
            ..Default::default()
        }
    }

    pub fn with_max_evaluations(mut self, max_evaluations: usize) -> Self {
        self.max_evaluations = Some(max_evaluations);
        self
    }

    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_sentinel(mut self, sentinel: Real) -> Self {
        self.sentinel = sentinel;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Budget actually handed to the optimizer.
    pub fn effective_max_evaluations(&self) -> usize {
        self.max_evaluations
            .unwrap_or(DEFAULT_EVALUATIONS_PER_PHASE * self.num_phases)
    }

    pub fn validate(&self) -> FlashResult<()> {
        if self.num_phases < 2 {
            return Err(FlashError::InvalidInput {
                what: format!("need at least two phases, got {}", self.num_phases),
            });
        }
        if !self.sentinel.is_finite() {
            return Err(FlashError::InvalidInput {
                what: "sentinel must be finite".to_string(),
            });
        }
        if self.sentinel < MIN_SENTINEL {
            return Err(FlashError::InvalidInput {
                what: format!(
                    "sentinel {} is below the minimum {}",
                    self.sentinel, MIN_SENTINEL
                ),
            });
        }
        self.to_de_config().validate()?;
        Ok(())
    }

    /// Optimizer settings derived from this configuration.
    pub fn to_de_config(&self) -> DeConfig {
        DeConfig {
            population_size: self.population_size,
            max_evaluations: self.effective_max_evaluations(),
            time_limit: self.time_limit,
            seed: self.seed,
            differential_weight: self.differential_weight,
            crossover_rate: self.crossover_rate,
            parallel: self.parallel,
        }
    }
}
