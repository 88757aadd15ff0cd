//! Z-score standardisation with percentile and outlier labelling.

use super::{mean, std_dev};
use crate::distributions::special::standard_normal_cdf;
use crate::error::{MlearnError, Result};
use std::fmt;

/// Observations with `|z| > OUTLIER_THRESHOLD` are labelled outliers.
pub const OUTLIER_THRESHOLD: f64 = 2.0;

/// One labelled observation with its derived scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub name: String,
    pub score: f64,
    pub z_score: f64,
    /// `Φ(z) · 100`, rounded half-to-even at two decimals.
    pub percentile: f64,
    pub is_outlier: bool,
}

impl ScoreRecord {
    pub fn remark(&self) -> &'static str {
        if self.is_outlier {
            "Outlier"
        } else {
            "Normal"
        }
    }
}

/// Z-scores of a labelled sample, standardised by its own sample mean and
/// sample standard deviation.
#[derive(Debug, Clone)]
pub struct ZScoreReport {
    pub mean: f64,
    pub std_dev: f64,
    pub records: Vec<ScoreRecord>,
}

impl ZScoreReport {
    /// Computes the report for `(name, score)` pairs, preserving input order.
    ///
    /// # Errors
    /// - [`MlearnError::EmptyData`] with fewer than two observations.
    /// - [`MlearnError::InvalidParameter`] if all scores are equal.
    pub fn from_scores<S: AsRef<str>>(entries: &[(S, f64)]) -> Result<Self> {
        let scores: Vec<f64> = entries.iter().map(|(_, s)| *s).collect();
        let mean = mean(&scores)
            .ok_or_else(|| MlearnError::EmptyData("z-scores need finite scores".into()))?;
        let std_dev = std_dev(&scores)
            .ok_or_else(|| MlearnError::EmptyData("z-scores need at least two scores".into()))?;
        if std_dev == 0.0 {
            return Err(MlearnError::InvalidParameter(
                "z-scores are undefined for a constant sample".into(),
            ));
        }

        let records = entries
            .iter()
            .map(|(name, score)| {
                let z = (score - mean) / std_dev;
                ScoreRecord {
                    name: name.as_ref().to_string(),
                    score: *score,
                    z_score: z,
                    percentile: round_to(standard_normal_cdf(z) * 100.0, 2),
                    is_outlier: z.abs() > OUTLIER_THRESHOLD,
                }
            })
            .collect();

        Ok(Self {
            mean,
            std_dev,
            records,
        })
    }

    pub fn outliers(&self) -> impl Iterator<Item = &ScoreRecord> {
        self.records.iter().filter(|r| r.is_outlier)
    }
}

impl fmt::Display for ZScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>3} {:<8} {:>6} {:>8} {:>11} {:>8}",
            "", "Name", "Score", "Z-score", "Percentile", "Remark"
        )?;
        for (i, r) in self.records.iter().enumerate() {
            writeln!(
                f,
                "{:>3} {:<8} {:>6} {:>8.2} {:>11.2} {:>8}",
                i,
                r.name,
                r.score,
                r.z_score,
                r.percentile,
                r.remark()
            )?;
        }
        Ok(())
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}
