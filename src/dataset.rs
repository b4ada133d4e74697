//! Columnar event table produced by the generator.
//!
//! Downstream consumers (plotting, summaries, gating code) want columnar,
//! randomly-accessible channel data with stable column names, so the table is
//! stored as one `Vec<f64>` per channel plus a per-row population index into
//! an interned name list. Rows are contiguous per population, in registry
//! order; the table is append-only during generation and immutable afterward.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Channel;

/// Immutable multi-channel event table.
///
/// Column names are stable: `FSC`, `SSC`, `FL1`, `FL2`, `Population`, plus a
/// `double_positive` flag column recording which rows received the elevated
/// dual-fluorescence adjustment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    fsc: Vec<f64>,
    ssc: Vec<f64>,
    fl1: Vec<f64>,
    fl2: Vec<f64>,
    /// Interned population names, registration order.
    population_names: Vec<String>,
    /// Per-row index into `population_names`.
    population: Vec<u32>,
    double_positive: Vec<bool>,
}

/// One row of a [`Dataset`], borrowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event<'a> {
    /// Forward scatter.
    pub fsc: f64,
    /// Side scatter.
    pub ssc: f64,
    /// FL1 fluorescence.
    pub fl1: f64,
    /// FL2 fluorescence.
    pub fl2: f64,
    /// Population label.
    pub population: &'a str,
    /// Whether this row received the double-positive boost.
    pub double_positive: bool,
}

impl Dataset {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table directly from columns.
    ///
    /// `population` holds per-row indices into `population_names`. All column
    /// lengths must match and every index must be in range; the
    /// `double_positive` flag defaults to `false` for every row.
    pub fn from_columns(
        population_names: Vec<String>,
        population: Vec<u32>,
        fsc: Vec<f64>,
        ssc: Vec<f64>,
        fl1: Vec<f64>,
        fl2: Vec<f64>,
    ) -> Result<Self> {
        let n = population.len();
        if fsc.len() != n || ssc.len() != n || fl1.len() != n || fl2.len() != n {
            return Err(Error::invalid_parameter(
                "columns",
                "all columns must have the same length",
            ));
        }
        if let Some(&idx) = population.iter().find(|&&i| i as usize >= population_names.len()) {
            return Err(Error::invalid_parameter(
                "population",
                format!("population index {idx} out of range"),
            ));
        }
        Ok(Self {
            fsc,
            ssc,
            fl1,
            fl2,
            population_names,
            population,
            double_positive: vec![false; n],
        })
    }

    /// Intern a population name, returning its row-index value.
    pub(crate) fn add_population(&mut self, name: &str) -> u32 {
        debug_assert!(
            !self.population_names.iter().any(|n| n == name),
            "population {name:?} interned twice"
        );
        self.population_names.push(name.to_string());
        (self.population_names.len() - 1) as u32
    }

    /// Append one row.
    pub(crate) fn push_row(&mut self, pop: u32, fsc: f64, ssc: f64, fl1: f64, fl2: f64) {
        self.fsc.push(fsc);
        self.ssc.push(ssc);
        self.fl1.push(fl1);
        self.fl2.push(fl2);
        self.population.push(pop);
        self.double_positive.push(false);
    }

    pub(crate) fn channel_mut(&mut self, channel: Channel) -> &mut [f64] {
        match channel {
            Channel::Fsc => &mut self.fsc,
            Channel::Ssc => &mut self.ssc,
            Channel::Fl1 => &mut self.fl1,
            Channel::Fl2 => &mut self.fl2,
        }
    }

    pub(crate) fn set_double_positive(&mut self, row: usize) {
        self.double_positive[row] = true;
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.population.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    /// One full channel column.
    pub fn channel(&self, channel: Channel) -> &[f64] {
        match channel {
            Channel::Fsc => &self.fsc,
            Channel::Ssc => &self.ssc,
            Channel::Fl1 => &self.fl1,
            Channel::Fl2 => &self.fl2,
        }
    }

    /// Interned population names in registration order.
    pub fn population_names(&self) -> &[String] {
        &self.population_names
    }

    /// Population label of one row.
    pub fn label(&self, row: usize) -> &str {
        &self.population_names[self.population[row] as usize]
    }

    /// Whether a row received the double-positive boost.
    pub fn is_double_positive(&self, row: usize) -> bool {
        self.double_positive[row]
    }

    /// Row count per population, in interning order.
    pub fn counts(&self) -> Vec<(String, usize)> {
        let mut counts = vec![0usize; self.population_names.len()];
        for &idx in &self.population {
            counts[idx as usize] += 1;
        }
        self.population_names
            .iter()
            .cloned()
            .zip(counts)
            .collect()
    }

    /// Row indices belonging to one population.
    pub fn rows_of(&self, name: &str) -> Vec<usize> {
        match self.population_names.iter().position(|n| n == name) {
            Some(target) => self
                .population
                .iter()
                .enumerate()
                .filter(|(_, &idx)| idx as usize == target)
                .map(|(row, _)| row)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Borrow one row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= len()`.
    pub fn event(&self, row: usize) -> Event<'_> {
        Event {
            fsc: self.fsc[row],
            ssc: self.ssc[row],
            fl1: self.fl1[row],
            fl2: self.fl2[row],
            population: self.label(row),
            double_positive: self.double_positive[row],
        }
    }

    /// Iterate over all rows in order.
    pub fn events(&self) -> impl Iterator<Item = Event<'_>> + '_ {
        (0..self.len()).map(move |row| self.event(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_row_dataset() -> Dataset {
        Dataset::from_columns(
            vec!["a".into(), "b".into()],
            vec![0, 1],
            vec![1.0, 2.0],
            vec![3.0, 4.0],
            vec![5.0, 6.0],
            vec![7.0, 8.0],
        )
        .unwrap()
    }

    #[test]
    fn test_from_columns_and_access() {
        let ds = two_row_dataset();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.channel(Channel::Fsc), &[1.0, 2.0]);
        assert_eq!(ds.channel(Channel::Fl2), &[7.0, 8.0]);
        assert_eq!(ds.label(0), "a");
        assert_eq!(ds.label(1), "b");
        assert!(!ds.is_double_positive(0));
    }

    #[test]
    fn test_from_columns_length_mismatch() {
        let err = Dataset::from_columns(
            vec!["a".into()],
            vec![0, 0],
            vec![1.0],
            vec![1.0, 2.0],
            vec![1.0, 2.0],
            vec![1.0, 2.0],
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_from_columns_index_out_of_range() {
        let err = Dataset::from_columns(
            vec!["a".into()],
            vec![0, 1],
            vec![1.0, 2.0],
            vec![1.0, 2.0],
            vec![1.0, 2.0],
            vec![1.0, 2.0],
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_counts_and_rows_of() {
        let mut ds = Dataset::new();
        let a = ds.add_population("a");
        let b = ds.add_population("b");
        ds.push_row(a, 0.0, 0.0, 0.0, 0.0);
        ds.push_row(a, 0.0, 0.0, 0.0, 0.0);
        ds.push_row(b, 0.0, 0.0, 0.0, 0.0);

        assert_eq!(ds.counts(), vec![("a".to_string(), 2), ("b".to_string(), 1)]);
        assert_eq!(ds.rows_of("a"), vec![0, 1]);
        assert_eq!(ds.rows_of("b"), vec![2]);
        assert!(ds.rows_of("c").is_empty());
    }

    #[test]
    fn test_events_iterator() {
        let ds = two_row_dataset();
        let rows: Vec<Event<'_>> = ds.events().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].ssc, 4.0);
        assert_eq!(rows[1].population, "b");
    }
}
