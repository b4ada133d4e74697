//! Descriptive statistics for generated channel data.
//!
//! Used by the terminal summary, the histogram plots, and the
//! distribution-convergence tests.

mod summary;

pub use summary::{histogram, histogram_in_range, summarize, ChannelSummary, Histogram};
