//! Channel summaries and histogram binning.

/// Descriptive summary of one channel column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSummary {
    /// Number of values.
    pub n: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std: f64,
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

/// Summarize a channel column.
///
/// An empty slice yields a zero-count summary with NaN statistics, which
/// callers should treat as "nothing to report".
pub fn summarize(data: &[f64]) -> ChannelSummary {
    let n = data.len();
    if n == 0 {
        return ChannelSummary {
            n: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
        };
    }

    let mean = data.iter().sum::<f64>() / n as f64;
    let std = if n > 1 {
        let ss = data.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        (ss / (n - 1) as f64).sqrt()
    } else {
        0.0
    };
    let (min, max) = data.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    });

    ChannelSummary {
        n,
        mean,
        std,
        min,
        max,
    }
}

/// Equal-width histogram over the data range.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Bin edges, `bins + 1` values from min to max.
    pub edges: Vec<f64>,
    /// Count per bin.
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Width of one bin.
    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    /// Largest bin count.
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Bin `data` into `bins` equal-width buckets spanning its min..max range.
///
/// The top edge is inclusive so the maximum lands in the last bin. A
/// degenerate range (all values equal) still produces `bins` buckets with
/// everything in the first.
///
/// # Panics
///
/// Panics if `data` is empty or `bins` is zero.
pub fn histogram(data: &[f64], bins: usize) -> Histogram {
    assert!(!data.is_empty(), "cannot bin an empty slice");

    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    histogram_in_range(data, min, max, bins)
}

/// Bin `data` against a fixed `[min, max]` range.
///
/// Useful for overlaying several groups on shared bin edges; values outside
/// the range are clamped into the first or last bin.
///
/// # Panics
///
/// Panics if `bins` is zero or `min > max`.
pub fn histogram_in_range(data: &[f64], min: f64, max: f64, bins: usize) -> Histogram {
    assert!(bins > 0, "bin count must be positive");
    assert!(min <= max, "histogram range is inverted");

    let span = max - min;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| min + span * i as f64 / bins as f64)
        .collect();

    let mut counts = vec![0usize; bins];
    for &v in data {
        let idx = if span == 0.0 {
            0
        } else {
            let scaled = ((v - min) / span * bins as f64).max(0.0);
            (scaled as usize).min(bins - 1)
        };
        counts[idx] += 1;
    }

    Histogram { edges, counts }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_basic() {
        let s = summarize(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(s.n, 8);
        assert!((s.mean - 5.0).abs() < 1e-12);
        // Sample std of this classic set is sqrt(32/7).
        assert!((s.std - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);
    }

    #[test]
    fn test_summarize_empty() {
        let s = summarize(&[]);
        assert_eq!(s.n, 0);
        assert!(s.mean.is_nan());
    }

    #[test]
    fn test_summarize_single_value() {
        let s = summarize(&[3.0]);
        assert_eq!(s.std, 0.0);
        assert_eq!(s.min, 3.0);
        assert_eq!(s.max, 3.0);
    }

    #[test]
    fn test_histogram_counts_sum_to_n() {
        let data: Vec<f64> = (0..1000).map(|i| i as f64 / 10.0).collect();
        let hist = histogram(&data, 100);
        assert_eq!(hist.counts.iter().sum::<usize>(), 1000);
        assert_eq!(hist.edges.len(), 101);
    }

    #[test]
    fn test_histogram_max_in_last_bin() {
        let hist = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);
        assert_eq!(hist.counts, vec![1, 1, 1, 2]);
    }

    #[test]
    fn test_histogram_in_range_clamps_outliers() {
        let hist = histogram_in_range(&[-1.0, 0.5, 2.0], 0.0, 1.0, 2);
        assert_eq!(hist.counts, vec![1, 2]);
    }

    #[test]
    fn test_histogram_degenerate_range() {
        let hist = histogram(&[5.0, 5.0, 5.0], 10);
        assert_eq!(hist.counts[0], 3);
        assert_eq!(hist.counts.iter().sum::<usize>(), 3);
    }
}
