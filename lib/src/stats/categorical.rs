//! Helpers for categorical variables: binning, grouping and contingency tables.

use crate::error::{MlearnError, Result};
use std::fmt;

/// Assigns each value to a right-closed bin `(edges[i], edges[i + 1]]`.
///
/// Returns the bin index per value, or `None` for values outside every bin
/// (including values equal to the first edge).
///
/// # Errors
/// Returns [`MlearnError::InvalidParameter`] unless `edges` has at least two
/// strictly increasing entries.
pub fn cut(values: &[f64], edges: &[f64]) -> Result<Vec<Option<usize>>> {
    if edges.len() < 2 || edges.windows(2).any(|w| w[0] >= w[1]) {
        return Err(MlearnError::InvalidParameter(
            "bin edges must be strictly increasing with at least two entries".into(),
        ));
    }
    Ok(values
        .iter()
        .map(|&v| edges.windows(2).position(|w| v > w[0] && v <= w[1]))
        .collect())
}

/// Collects `values` per label, in the order given by `order`.
///
/// Labels not present in `order` are dropped; labels in `order` with no
/// values yield an empty group.
pub fn group_values<'a, L>(labels: &[L], values: &[f64], order: &[&'a str]) -> Vec<(&'a str, Vec<f64>)>
where
    L: AsRef<str>,
{
    order
        .iter()
        .map(|&name| {
            let group = labels
                .iter()
                .zip(values)
                .filter(|(label, _)| as_str(*label) == name)
                .map(|(_, &v)| v)
                .collect();
            (name, group)
        })
        .collect()
}

fn as_str<L: AsRef<str>>(label: &L) -> &str {
    label.as_ref()
}

/// Counts of observations for every (row category, column category) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ContingencyTable {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    /// `counts[r][c]` observations with row label `r` and column label `c`.
    pub counts: Vec<Vec<usize>>,
}

impl ContingencyTable {
    pub fn count(&self, row: &str, col: &str) -> Option<usize> {
        let r = self.row_labels.iter().position(|l| l == row)?;
        let c = self.col_labels.iter().position(|l| l == col)?;
        Some(self.counts[r][c])
    }

    pub fn row_total(&self, row: usize) -> usize {
        self.counts[row].iter().sum()
    }
}

impl fmt::Display for ContingencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .row_labels
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max(1);
        write!(f, "{:width$}", "")?;
        for col in &self.col_labels {
            write!(f, " {col:>6}")?;
        }
        writeln!(f)?;
        for (label, row) in self.row_labels.iter().zip(&self.counts) {
            write!(f, "{label:width$}")?;
            for count in row {
                write!(f, " {count:>6}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Builds a contingency table from two parallel label columns.
///
/// Row and column categories are sorted lexicographically.
///
/// # Errors
/// Returns [`MlearnError::InvalidParameter`] if the columns differ in length.
pub fn crosstab<L: AsRef<str>>(rows: &[L], cols: &[L]) -> Result<ContingencyTable> {
    if rows.len() != cols.len() {
        return Err(MlearnError::InvalidParameter(format!(
            "crosstab columns differ in length: {} vs {}",
            rows.len(),
            cols.len()
        )));
    }
    let categories = |labels: &[L]| {
        let mut cats: Vec<String> = labels.iter().map(|l| as_str(l).to_string()).collect();
        cats.sort();
        cats.dedup();
        cats
    };
    let row_labels = categories(rows);
    let col_labels = categories(cols);

    let mut counts = vec![vec![0usize; col_labels.len()]; row_labels.len()];
    for (r, c) in rows.iter().zip(cols) {
        let ri = row_labels.iter().position(|l| l == as_str(r));
        let ci = col_labels.iter().position(|l| l == as_str(c));
        if let (Some(ri), Some(ci)) = (ri, ci) {
            counts[ri][ci] += 1;
        }
    }
    Ok(ContingencyTable {
        row_labels,
        col_labels,
        counts,
    })
}
