//! End-to-end generation properties: allocation, ordering, and convergence
//! of the empirical channel distributions.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use cytosim::statistics::summarize;
use cytosim::{
    generate, Channel, PopulationRegistry, PopulationSpec, SimulationConfig,
};

fn single_population_registry(proportion: f64) -> PopulationRegistry {
    let mut registry = PopulationRegistry::new();
    registry
        .register(PopulationSpec::new(
            "cells",
            proportion,
            (100.0, 10.0),
            (200.0, 20.0),
            (50.0, 5.0),
            (25.0, 2.5),
        ))
        .unwrap();
    registry
}

#[test]
fn full_proportion_yields_exact_count() {
    let registry = single_population_registry(1.0);
    let config = SimulationConfig::new().total_events(12_345);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);

    let dataset = generate(&registry, &config, &mut rng).unwrap();
    assert_eq!(dataset.len(), 12_345);
    assert!(dataset.events().all(|e| e.population == "cells"));
}

#[test]
fn default_populations_allocate_in_registry_order() {
    let registry = PopulationRegistry::with_defaults();
    let config = SimulationConfig::new().total_events(1_000);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(2);

    let dataset = generate(&registry, &config, &mut rng).unwrap();
    let counts = dataset.counts();
    assert_eq!(counts[0], ("lymphocytes".to_string(), 600));
    assert_eq!(counts[1], ("monocytes".to_string(), 300));
    assert_eq!(counts[2], ("granulocytes".to_string(), 100));

    // Rows are contiguous blocks in the same order.
    let labels: Vec<&str> = dataset.events().map(|e| e.population).collect();
    assert!(labels[..600].iter().all(|&l| l == "lymphocytes"));
    assert!(labels[600..900].iter().all(|&l| l == "monocytes"));
    assert!(labels[900..].iter().all(|&l| l == "granulocytes"));
}

#[test]
fn empirical_distribution_converges_to_configured_parameters() {
    // Double-positive adjustment off, so the raw marginals are pure normals.
    let registry = single_population_registry(1.0);
    let config = SimulationConfig::new()
        .total_events(100_000)
        .double_positive_fraction(0.0);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);

    let dataset = generate(&registry, &config, &mut rng).unwrap();
    let expected = [
        (Channel::Fsc, 100.0, 10.0),
        (Channel::Ssc, 200.0, 20.0),
        (Channel::Fl1, 50.0, 5.0),
        (Channel::Fl2, 25.0, 2.5),
    ];
    for (channel, mean, std) in expected {
        let summary = summarize(dataset.channel(channel));
        let mean_err = (summary.mean - mean).abs() / mean;
        let std_err = (summary.std - std).abs() / std;
        assert!(
            mean_err < 0.02,
            "{channel} mean off by {:.2}%: {} vs {mean}",
            mean_err * 100.0,
            summary.mean
        );
        assert!(
            std_err < 0.03,
            "{channel} std off by {:.2}%: {} vs {std}",
            std_err * 100.0,
            summary.std
        );
    }
}

#[test]
fn double_positive_shifts_fluorescence_means_upward() {
    let registry = single_population_registry(1.0);
    let base_config = SimulationConfig::new()
        .total_events(50_000)
        .double_positive_fraction(0.0);
    let dp_config = SimulationConfig::new()
        .total_events(50_000)
        .double_positive_fraction(0.10);

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(4);
    let base = generate(&registry, &base_config, &mut rng).unwrap();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(4);
    let boosted = generate(&registry, &dp_config, &mut rng).unwrap();

    // 10% of rows gain ~+20 on each fluorescence channel, so the overall
    // means shift by roughly +2. Scatter channels stay put.
    for channel in [Channel::Fl1, Channel::Fl2] {
        let delta = summarize(boosted.channel(channel)).mean
            - summarize(base.channel(channel)).mean;
        assert!(
            delta > 1.0 && delta < 3.0,
            "{channel} mean shift {delta} outside expected band"
        );
    }
    let fsc_delta = (summarize(boosted.channel(Channel::Fsc)).mean
        - summarize(base.channel(Channel::Fsc)).mean)
        .abs();
    assert!(fsc_delta < 0.5);
}

#[test]
fn tiny_population_rounds_to_zero_rows() {
    let mut registry = single_population_registry(1.0);
    registry
        .register(PopulationSpec::new(
            "rare",
            0.0001,
            (10.0, 1.0),
            (10.0, 1.0),
            (10.0, 1.0),
            (10.0, 1.0),
        ))
        .unwrap();

    let config = SimulationConfig::new().total_events(100);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
    let dataset = generate(&registry, &config, &mut rng).unwrap();

    // round(0.0001 * 100) == 0: the population exists but contributes no rows.
    assert_eq!(dataset.counts()[1], ("rare".to_string(), 0));
    assert_eq!(dataset.len(), 100);
}
