//! Metrics for evaluating regression models.

use std::fmt;

/// Namespace for regression metrics over paired slices.
///
/// All functions panic if `y_true` and `y_pred` differ in length and
/// return `0.0` for empty input.
pub struct Metrics;

impl Metrics {
    /// Mean Squared Error: `mean((y_true - y_pred)^2)`.
    pub fn mse(y_true: &[f64], y_pred: &[f64]) -> f64 {
        assert_eq!(
            y_true.len(),
            y_pred.len(),
            "Arrays must have the same length"
        );
        if y_true.is_empty() {
            return 0.0;
        }

        let sum_sq: f64 = y_true
            .iter()
            .zip(y_pred)
            .map(|(&t, &p)| (t - p).powi(2))
            .sum();
        sum_sq / y_true.len() as f64
    }

    /// Root Mean Squared Error, in the units of the target.
    pub fn rmse(y_true: &[f64], y_pred: &[f64]) -> f64 {
        Self::mse(y_true, y_pred).sqrt()
    }

    /// Mean Absolute Error: `mean(|y_true - y_pred|)`.
    pub fn mae(y_true: &[f64], y_pred: &[f64]) -> f64 {
        assert_eq!(
            y_true.len(),
            y_pred.len(),
            "Arrays must have the same length"
        );
        if y_true.is_empty() {
            return 0.0;
        }

        let sum_abs: f64 = y_true
            .iter()
            .zip(y_pred)
            .map(|(&t, &p)| (t - p).abs())
            .sum();
        sum_abs / y_true.len() as f64
    }

    /// Coefficient of determination `1 - SS_res / SS_tot`.
    ///
    /// Negative when the predictions are worse than the target mean. A
    /// constant target scores 1.0 only for an exact fit.
    pub fn r_squared(y_true: &[f64], y_pred: &[f64]) -> f64 {
        assert_eq!(
            y_true.len(),
            y_pred.len(),
            "Arrays must have the same length"
        );
        if y_true.is_empty() {
            return 0.0;
        }

        let mean_true = y_true.iter().sum::<f64>() / y_true.len() as f64;
        let ss_res: f64 = y_true
            .iter()
            .zip(y_pred)
            .map(|(&t, &p)| (t - p).powi(2))
            .sum();
        let ss_tot: f64 = y_true.iter().map(|&t| (t - mean_true).powi(2)).sum();

        if ss_tot == 0.0 {
            return if ss_res == 0.0 { 1.0 } else { 0.0 };
        }
        1.0 - ss_res / ss_tot
    }

    pub fn calculate_all(y_true: &[f64], y_pred: &[f64]) -> RegressionMetrics {
        let mse = Self::mse(y_true, y_pred);
        RegressionMetrics {
            mse,
            rmse: mse.sqrt(),
            mae: Self::mae(y_true, y_pred),
            r_squared: Self::r_squared(y_true, y_pred),
        }
    }
}

/// MSE, RMSE, MAE and R² of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionMetrics {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    pub r_squared: f64,
}

impl fmt::Display for RegressionMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MSE: {:.2}, RMSE: {:.2}, MAE: {:.2}, R²: {:.4}",
            self.mse, self.rmse, self.mae, self.r_squared
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mse_perfect() {
        let y = [1.0, 2.0, 3.0, 4.0];
        assert_abs_diff_eq!(Metrics::mse(&y, &y), 0.0);
    }

    #[test]
    fn test_mse_and_mae_constant_offset() {
        let y_true = [1.0, 2.0, 3.0, 4.0];
        let y_pred = [2.0, 3.0, 4.0, 5.0];
        assert_abs_diff_eq!(Metrics::mse(&y_true, &y_pred), 1.0);
        assert_abs_diff_eq!(Metrics::mae(&y_true, &y_pred), 1.0);
        assert_abs_diff_eq!(Metrics::rmse(&y_true, &y_pred), 1.0);
    }

    #[test]
    fn test_r_squared_perfect_and_mean_predictor() {
        let y_true = [1.0, 2.0, 3.0, 4.0];
        assert_abs_diff_eq!(Metrics::r_squared(&y_true, &y_true), 1.0);
        let mean = [2.5; 4];
        assert_abs_diff_eq!(Metrics::r_squared(&y_true, &mean), 0.0);
    }

    #[test]
    fn test_r_squared_constant_target() {
        let y = [2.0; 4];
        assert_abs_diff_eq!(Metrics::r_squared(&y, &y), 1.0);
        assert_abs_diff_eq!(Metrics::r_squared(&y, &[1.0; 4]), 0.0);
    }

    #[test]
    fn test_calculate_all() {
        let y_true = [3.0, -0.5, 2.0, 7.0];
        let y_pred = [2.5, 0.0, 2.0, 8.0];
        let m = Metrics::calculate_all(&y_true, &y_pred);
        assert_abs_diff_eq!(m.mse, 0.375, epsilon = 1e-12);
        assert_abs_diff_eq!(m.mae, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(m.r_squared, 0.948_608_137, epsilon = 1e-6);
        assert!(m.to_string().starts_with("MSE: 0.38"));
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_length_mismatch_panics() {
        Metrics::mse(&[1.0], &[1.0, 2.0]);
    }
}
