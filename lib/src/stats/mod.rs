//! Descriptive statistics.
//!
//! Plain `f64` slice functions returning `Option` when the statistic is
//! undefined (empty input, fewer than two samples, non-finite values).
//!
//! - **Mean**: Neumaier compensated summation.
//! - **Variance/StdDev**: sample (denominator `n − 1`) unless prefixed with
//!   `population_`.
//! - **Quantile**: linear interpolation between order statistics (the R-7
//!   rule, which is what `describe()` tables conventionally show).

pub mod categorical;
pub mod zscore;

pub use categorical::{crosstab, cut, group_values, ContingencyTable};
pub use zscore::{ScoreRecord, ZScoreReport, OUTLIER_THRESHOLD};

use std::fmt;

/// Arithmetic mean.
///
/// # Returns
/// - `None` if `data` is empty or contains NaN/Inf.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    Some(compensated_sum(data) / data.len() as f64)
}

/// Sample variance with Bessel's correction.
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let m = mean(data)?;
    let ss: f64 = data.iter().map(|&x| (x - m) * (x - m)).sum();
    Some(ss / (data.len() - 1) as f64)
}

/// Population variance (denominator `n`).
pub fn population_variance(data: &[f64]) -> Option<f64> {
    let m = mean(data)?;
    let ss: f64 = data.iter().map(|&x| (x - m) * (x - m)).sum();
    Some(ss / data.len() as f64)
}

/// Sample standard deviation.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}

/// Population standard deviation.
pub fn population_std_dev(data: &[f64]) -> Option<f64> {
    population_variance(data).map(f64::sqrt)
}

/// Smallest value, `None` if empty or any value is NaN.
pub fn min(data: &[f64]) -> Option<f64> {
    if data.is_empty() || data.iter().any(|x| x.is_nan()) {
        return None;
    }
    data.iter().copied().reduce(f64::min)
}

/// Largest value, `None` if empty or any value is NaN.
pub fn max(data: &[f64]) -> Option<f64> {
    if data.is_empty() || data.iter().any(|x| x.is_nan()) {
        return None;
    }
    data.iter().copied().reduce(f64::max)
}

/// Median (50th percentile).
pub fn median(data: &[f64]) -> Option<f64> {
    quantile(data, 0.5)
}

/// Quantile `p ∈ [0, 1]` with linear interpolation between order statistics.
///
/// # Returns
/// - `None` if `data` is empty, contains NaN, or `p` is outside `[0, 1]`.
pub fn quantile(data: &[f64], p: f64) -> Option<f64> {
    if data.is_empty() || !(0.0..=1.0).contains(&p) || data.iter().any(|x| x.is_nan()) {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(quantile_sorted(&sorted, p))
}

/// Quantile of data that is already sorted ascending. `sorted` must be non-empty.
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Sample covariance.
///
/// # Returns
/// - `None` if lengths differ, `n < 2`, or data contains NaN/Inf.
pub fn covariance(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len();
    if n != y.len() || n < 2 {
        return None;
    }
    let mx = mean(x)?;
    let my = mean(y)?;
    let sum: f64 = x.iter().zip(y).map(|(&a, &b)| (a - mx) * (b - my)).sum();
    Some(sum / (n - 1) as f64)
}

/// Pearson correlation coefficient.
///
/// # Returns
/// - `None` under the same conditions as [`covariance`], or when either
///   input has zero variance.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let cov = covariance(x, y)?;
    let sx = std_dev(x)?;
    let sy = std_dev(y)?;
    if sx == 0.0 || sy == 0.0 {
        return None;
    }
    Some((cov / (sx * sy)).clamp(-1.0, 1.0))
}

/// Least-squares line `y = slope·x + intercept`.
///
/// # Returns
/// - `None` under the same conditions as [`pearson_correlation`].
pub fn linear_fit(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    let cov = covariance(x, y)?;
    let var_x = variance(x)?;
    if var_x == 0.0 {
        return None;
    }
    let slope = cov / var_x;
    Some((slope, mean(y)? - slope * mean(x)?))
}

/// Equal-width histogram over `[min, max]` with `bins` bins.
///
/// Every bin is half-open except the last, which also includes `max`.
/// Returns `(edges, counts)` with `edges.len() == bins + 1`, or `None` for
/// empty or non-finite input or zero bins. A constant sample gets the range
/// `[v − 0.5, v + 0.5]`.
pub fn histogram(data: &[f64], bins: usize) -> Option<(Vec<f64>, Vec<usize>)> {
    if bins == 0 || data.is_empty() || data.iter().any(|x| !x.is_finite()) {
        return None;
    }
    let (mut lo, mut hi) = (min(data)?, max(data)?);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { hi } else { lo + width * i as f64 })
        .collect();
    let mut counts = vec![0usize; bins];
    for &v in data {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Some((edges, counts))
}

/// Neumaier compensated summation.
pub fn compensated_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

/// Count, mean, std and quartiles of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `NaN` when `count < 2`.
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl Summary {
    /// Summarises `data`, returning `None` for empty or non-finite input.
    pub fn describe(data: &[f64]) -> Option<Self> {
        let mean = mean(data)?;
        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            count: data.len(),
            mean,
            std: std_dev(data).unwrap_or(f64::NAN),
            min: sorted[0],
            q1: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q3: quantile_sorted(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }

    /// Header line matching the column order of the [`fmt::Display`] output.
    pub fn header() -> String {
        format!(
            "{:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        )
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>6} {:>10.6} {:>10.6} {:>10.6} {:>10.6} {:>10.6} {:>10.6} {:>10.6}",
            self.count, self.mean, self.std, self.min, self.q1, self.median, self.q3, self.max
        )
    }
}

/// Box-and-whisker statistics with Tukey fences at 1.5 × IQR.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest observation inside the lower fence.
    pub lower_whisker: f64,
    /// Largest observation inside the upper fence.
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn from_data(data: &[f64]) -> Option<Self> {
        if data.is_empty() || data.iter().any(|x| !x.is_finite()) {
            return None;
        }
        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);
        let q1 = quantile_sorted(&sorted, 0.25);
        let median = quantile_sorted(&sorted, 0.5);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let (lo_fence, hi_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        let inside = || sorted.iter().copied().filter(|&v| v >= lo_fence && v <= hi_fence);
        let lower_whisker = inside().next().unwrap_or(q1);
        let upper_whisker = inside().last().unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < lo_fence || v > hi_fence)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}
