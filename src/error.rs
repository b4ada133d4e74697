//! Error types for cytosim.
//!
//! Two broad classes:
//! - Recoverable parameter errors (`UnknownPopulation`, `InvalidParameter`)
//!   surfaced to interactive callers, which keep the prior state and re-prompt.
//! - Configuration errors (`InvalidEventCount`, `EmptyRegistry`,
//!   `InvalidCoefficient`) that abort a simulation before any rows are
//!   produced.

use thiserror::Error;

/// Top-level error type for cytosim.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested population name is not registered.
    #[error("unknown population: {0:?}")]
    UnknownPopulation(String),

    /// A parameter edit or spec failed domain validation.
    ///
    /// The registry guarantees the prior value is retained whenever this is
    /// returned.
    #[error("invalid value for {field}: {reason}")]
    InvalidParameter {
        /// Field that was being set.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A simulation was requested with zero events.
    #[error("total event count must be positive")]
    InvalidEventCount,

    /// A simulation was requested against a registry with no populations.
    #[error("population registry is empty")]
    EmptyRegistry,

    /// A spillover coefficient is outside the physically plausible [0, 1) range.
    #[error("spillover coefficient {name} out of range [0, 1): {value}")]
    InvalidCoefficient {
        /// Coefficient name (`fl2_into_fl1` or `fl1_into_fl2`).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Plot rendering failed in the drawing backend.
    #[error("plot rendering failed: {0}")]
    Render(String),
}

impl Error {
    /// Construct an [`Error::InvalidParameter`].
    pub fn invalid_parameter(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error is recoverable by re-prompting the user.
    ///
    /// Used by the interactive parameter editor: recoverable errors are
    /// printed and the edit loop continues, anything else propagates.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::UnknownPopulation(_) | Error::InvalidParameter { .. }
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
