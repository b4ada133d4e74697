//! Fluorescence spillover (spectral crosstalk) transform.
//!
//! Real optical filters are imperfect: a fraction of each fluorochrome's
//! emission appears in the other detector. The transform is a simultaneous
//! linear mix of the two fluorescence channels,
//!
//! ```text
//! FL1' = FL1 + fl2_into_fl1 * FL2
//! FL2' = FL2 + fl1_into_fl2 * FL1
//! ```
//!
//! with the *pre-transform* values on both right-hand sides. Applying one
//! update before reading the other would feed the already-mixed channel into
//! the second equation and bias it; expressing the transform as a single 2x2
//! matrix-vector product per row rules that bug class out structurally.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::types::{Channel, Matrix2, Vector2};

/// Crosstalk coefficients between the two fluorescence channels.
///
/// Both coefficients must lie in `[0, 1)`: negative crosstalk is not
/// physical, and a channel leaking its entire signal (or more) into the
/// other is outside any plausible optical configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpilloverCoefficients {
    /// Fraction of the FL2 signal leaking into the FL1 detector.
    pub fl2_into_fl1: f64,
    /// Fraction of the FL1 signal leaking into the FL2 detector.
    pub fl1_into_fl2: f64,
}

impl Default for SpilloverCoefficients {
    /// Default crosstalk: 10% of FL2 into FL1, 5% of FL1 into FL2.
    fn default() -> Self {
        Self {
            fl2_into_fl1: 0.1,
            fl1_into_fl2: 0.05,
        }
    }
}

impl SpilloverCoefficients {
    /// Create coefficients, validating the `[0, 1)` bound.
    pub fn new(fl2_into_fl1: f64, fl1_into_fl2: f64) -> Result<Self> {
        let coefficients = Self {
            fl2_into_fl1,
            fl1_into_fl2,
        };
        coefficients.validate()?;
        Ok(coefficients)
    }

    /// Check both coefficients against the `[0, 1)` range.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("fl2_into_fl1", self.fl2_into_fl1),
            ("fl1_into_fl2", self.fl1_into_fl2),
        ] {
            if !value.is_finite() || !(0.0..1.0).contains(&value) {
                return Err(Error::InvalidCoefficient { name, value });
            }
        }
        Ok(())
    }

    /// The transform as a 2x2 mixing matrix over `(FL1, FL2)` vectors.
    pub fn as_matrix(&self) -> Matrix2 {
        Matrix2::new(1.0, self.fl2_into_fl1, self.fl1_into_fl2, 1.0)
    }
}

/// Apply spillover mixing to the fluorescence channels of `dataset`.
///
/// Returns a new table; the input keeps its raw, uncompensated values so
/// callers can hold both. FSC and SSC are untouched.
///
/// # Errors
///
/// [`Error::InvalidCoefficient`] if a coefficient is negative, non-finite,
/// or >= 1.
pub fn apply_spillover(dataset: &Dataset, coefficients: &SpilloverCoefficients) -> Result<Dataset> {
    coefficients.validate()?;

    let mixing = coefficients.as_matrix();
    let mut mixed = dataset.clone();
    for row in 0..mixed.len() {
        let raw = Vector2::new(
            dataset.channel(Channel::Fl1)[row],
            dataset.channel(Channel::Fl2)[row],
        );
        let out = mixing * raw;
        mixed.channel_mut(Channel::Fl1)[row] = out[0];
        mixed.channel_mut(Channel::Fl2)[row] = out[1];
    }

    debug!(
        rows = mixed.len(),
        fl2_into_fl1 = coefficients.fl2_into_fl1,
        fl1_into_fl2 = coefficients.fl1_into_fl2,
        "applied spillover"
    );
    Ok(mixed)
}
