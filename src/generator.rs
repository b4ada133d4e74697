//! Per-population sample generation and table assembly.
//!
//! The generator is a pure function of (registry state, configuration, random
//! source): it draws each population's channel values from independent
//! univariate normals, applies the double-positive adjustment to a uniformly
//! chosen subset, and concatenates all populations into one [`Dataset`] in
//! registry order. Spillover is applied afterwards by
//! [`apply_spillover`](crate::apply_spillover); the table returned here holds
//! the raw, uncompensated signal.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::config::SimulationConfig;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::registry::{PopulationRegistry, PopulationSpec};
use crate::types::Channel;

/// Draw the full event table for every registered population.
///
/// Each population receives `round(proportion * total_events)` rows. The
/// per-population counts are independent shares: if proportions do not sum
/// to 1, the row total drifts from `total_events` accordingly and the drift
/// is accepted silently (no renormalization). Rows are contiguous per
/// population, ordered by registration.
///
/// # Errors
///
/// * [`Error::EmptyRegistry`] if the registry has no populations.
/// * [`Error::InvalidEventCount`] if `config.total_events` is zero.
/// * [`Error::InvalidParameter`] if the configuration or a spec holds an
///   out-of-domain value (only reachable when a spec was mutated outside
///   [`PopulationRegistry::update`]).
pub fn generate(
    registry: &PopulationRegistry,
    config: &SimulationConfig,
    rng: &mut impl Rng,
) -> Result<Dataset> {
    config.validate()?;
    if registry.is_empty() {
        return Err(Error::EmptyRegistry);
    }

    let mut dataset = Dataset::new();
    for spec in registry.list() {
        generate_population(spec, config, rng, &mut dataset)?;
    }

    debug!(
        rows = dataset.len(),
        requested = config.total_events,
        populations = registry.len(),
        "assembled event table"
    );
    Ok(dataset)
}

/// Draw one population's rows and append them to `dataset`.
fn generate_population(
    spec: &PopulationSpec,
    config: &SimulationConfig,
    rng: &mut impl Rng,
    dataset: &mut Dataset,
) -> Result<()> {
    let n = (spec.proportion * config.total_events as f64).round() as usize;
    let pop = dataset.add_population(&spec.name);
    let base = dataset.len();

    let fsc = normal(spec.fsc_mean, spec.fsc_std, "fsc_std")?;
    let ssc = normal(spec.ssc_mean, spec.ssc_std, "ssc_std")?;
    let fl1 = normal(spec.fl1_mean, spec.fl1_std, "fl1_std")?;
    let fl2 = normal(spec.fl2_mean, spec.fl2_std, "fl2_std")?;

    for _ in 0..n {
        dataset.push_row(
            pop,
            fsc.sample(rng),
            ssc.sample(rng),
            fl1.sample(rng),
            fl2.sample(rng),
        );
    }

    let boosted = apply_double_positive(config, rng, dataset, base, n)?;
    debug!(
        population = %spec.name,
        events = n,
        double_positive = boosted,
        "generated population"
    );
    Ok(())
}

/// Boost FL1/FL2 on `round(fraction * n)` rows chosen without replacement.
///
/// The boost is an independent `Normal(boost_mean, boost_std)` increment per
/// channel, added to the already-drawn values so the marginal fluorescence
/// distribution of the population tends bimodal. Returns the number of rows
/// boosted.
fn apply_double_positive(
    config: &SimulationConfig,
    rng: &mut impl Rng,
    dataset: &mut Dataset,
    base: usize,
    n: usize,
) -> Result<usize> {
    let k = (config.double_positive_fraction * n as f64).round() as usize;
    if k == 0 {
        return Ok(0);
    }

    let boost = normal(
        config.double_positive_boost_mean,
        config.double_positive_boost_std,
        "double_positive_boost_std",
    )?;

    for local in rand::seq::index::sample(rng, n, k) {
        let row = base + local;
        dataset.channel_mut(Channel::Fl1)[row] += boost.sample(rng);
        dataset.channel_mut(Channel::Fl2)[row] += boost.sample(rng);
        dataset.set_double_positive(row);
    }
    Ok(k)
}

fn normal(mean: f64, std: f64, field: &'static str) -> Result<Normal<f64>> {
    Normal::new(mean, std).map_err(|e| Error::invalid_parameter(field, e.to_string()))
}
