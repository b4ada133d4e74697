//! Configuration for synthetic cytometry runs.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration options for a simulation run.
///
/// Controls how many events are drawn, how the double-positive subpopulation
/// is produced, and (optionally) the RNG seed. Population parameters live in
/// the [`PopulationRegistry`](crate::PopulationRegistry), not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Total number of events requested across all populations.
    ///
    /// Each population receives `round(proportion * total_events)` events;
    /// rounding drift between the per-population sum and this value is
    /// accepted silently (see [`generate`](crate::generate)). Default: 10,000.
    pub total_events: usize,

    /// Fraction of each population boosted to emulate double-positive cells.
    ///
    /// Exactly `round(fraction * n)` rows per population are selected
    /// uniformly without replacement and given elevated FL1/FL2. Set to 0.0
    /// to disable the adjustment entirely. Default: 0.10.
    pub double_positive_fraction: f64,

    /// Mean of the fluorescence boost added to double-positive rows.
    ///
    /// Default: 20.0.
    pub double_positive_boost_mean: f64,

    /// Standard deviation of the fluorescence boost. Default: 5.0.
    pub double_positive_boost_std: f64,

    /// Optional deterministic seed.
    ///
    /// When `None`, a seed is drawn from OS entropy at run time and recorded
    /// in the result, so any run can be replayed. Default: None.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            total_events: 10_000,
            double_positive_fraction: 0.10,
            double_positive_boost_mean: 20.0,
            double_positive_boost_std: 5.0,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a small configuration for quick smoke runs.
    ///
    /// 1,000 events, everything else default.
    pub fn quick() -> Self {
        Self {
            total_events: 1_000,
            ..Default::default()
        }
    }

    /// Create a large configuration for distribution-convergence work.
    ///
    /// 100,000 events, everything else default.
    pub fn large() -> Self {
        Self {
            total_events: 100_000,
            ..Default::default()
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set the total event count.
    pub fn total_events(mut self, n: usize) -> Self {
        assert!(n > 0, "total_events must be positive");
        self.total_events = n;
        self
    }

    /// Set the double-positive fraction.
    pub fn double_positive_fraction(mut self, fraction: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&fraction),
            "double_positive_fraction must be in [0, 1]"
        );
        self.double_positive_fraction = fraction;
        self
    }

    /// Set the double-positive boost distribution.
    pub fn double_positive_boost(mut self, mean: f64, std: f64) -> Self {
        assert!(mean > 0.0, "boost mean must be positive");
        assert!(std >= 0.0, "boost std must be non-negative");
        self.double_positive_boost_mean = mean;
        self.double_positive_boost_std = std;
        self
    }

    /// Set a deterministic seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<()> {
        if self.total_events == 0 {
            return Err(Error::InvalidEventCount);
        }
        if !(0.0..=1.0).contains(&self.double_positive_fraction) {
            return Err(Error::invalid_parameter(
                "double_positive_fraction",
                "must be in [0, 1]",
            ));
        }
        if !self.double_positive_boost_mean.is_finite() || self.double_positive_boost_mean <= 0.0 {
            return Err(Error::invalid_parameter(
                "double_positive_boost_mean",
                "must be a positive finite number",
            ));
        }
        if !self.double_positive_boost_std.is_finite() || self.double_positive_boost_std < 0.0 {
            return Err(Error::invalid_parameter(
                "double_positive_boost_std",
                "must be a non-negative finite number",
            ));
        }
        Ok(())
    }
}
