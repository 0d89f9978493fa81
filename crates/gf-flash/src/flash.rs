//! Flash driver: input checks, global search, final decode.

use crate::codec;
use crate::config::FlashConfig;
use crate::error::FlashResult;
use crate::objective::GibbsObjective;
use crate::solution::FlashSolution;
use gf_core::Real;
use gf_core::timing;
use gf_core::units::{Pressure, Temperature};
use gf_eos::{CountingModel, Feed, GibbsModel, validation};
use gf_optim::{Bounds, DifferentialEvolution};
use tracing::{debug, info, info_span, warn};

/// Multiphase PT flash by global minimization of the Gibbs energy.
///
/// `total_moles` is the feed, index-aligned with the model's species.
/// Fails only on precondition violations, all checked before the search:
/// - pressure or temperature not positive and finite
/// - feed empty, negative, non-finite, or summing to zero
/// - feed length differs from the model's species count
/// - invalid configuration (fewer than two phases, zero budget, ...)
///
/// Reaching the evaluation budget or the time limit is not a failure: the best
/// partition found so far is returned. Inspect [`FlashSolution::objective`]
/// and the phase diagnostics to judge the result.
pub fn flash<M: GibbsModel + ?Sized>(
    model: &M,
    p: Pressure,
    t: Temperature,
    total_moles: &[Real],
    config: &FlashConfig,
) -> FlashResult<FlashSolution> {
    validation::validate_pressure(p)?;
    validation::validate_temperature(t)?;
    let feed = Feed::new(total_moles.to_vec())?;
    validation::validate_species_count(model, feed.len())?;
    config.validate()?;

    let span = info_span!(
        "flash",
        model = model.name(),
        phases = config.num_phases,
        species = feed.len()
    );
    let _guard = span.enter();
    debug!(
        p_pa = p.value,
        t_k = t.value,
        ?config,
        "starting flash"
    );

    let bounds = Bounds::unit_cube(codec::decision_len(config.num_phases, feed.len()))?;
    let optimizer = DifferentialEvolution::new(config.to_de_config())?;

    let counted = CountingModel::new(model);
    let objective = GibbsObjective::new(&counted, p, t, &feed, config.num_phases, config.sentinel);
    let best = optimizer.minimize(|x| objective.evaluate(x), &bounds)?;

    // Fresh decode of the winner; nothing is reused from inside the search.
    let partition = codec::decode_vector(best.x.as_slice(), feed.amounts(), config.num_phases)?;

    if best.value >= config.sentinel {
        warn!(
            failures = counted.failures(),
            "no candidate partition had a finite Gibbs energy"
        );
    }
    if timing::is_enabled() {
        info!(
            calls = counted.evaluations(),
            failures = counted.failures(),
            total_s = counted.total_seconds(),
            avg_ms = counted.average_seconds() * 1000.0,
            "model evaluation timing"
        );
    }

    let solution = FlashSolution {
        partition,
        objective: best.value,
        evaluations: best.evaluations,
        elapsed: best.elapsed,
        stop: best.stop,
    };
    info!(
        objective = solution.objective(),
        phase_fractions = ?solution.phase_fractions(),
        evaluations = solution.evaluations(),
        stop = %solution.stop(),
        "flash finished"
    );
    Ok(solution)
}
