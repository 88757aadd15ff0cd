//! One-step-ahead forecasting with an exponential moving average.

use crate::error::{MlearnError, Result};
use crate::random::{create_rng, normal_samples};
use log::debug;
use std::f64::consts::PI;

/// Online scalar estimator.
///
/// Implementations accept values incrementally via [`add`](Self::add) and
/// expose the current estimate via [`estimation`](Self::estimation).
pub trait Estimator {
    /// Incorporates a new observation.
    fn add(&mut self, v: f64);

    /// Returns the current estimate, NaN before the first observation.
    fn estimation(&self) -> f64;
}

/// Exponential moving average `s ← α·v + (1 − α)·s`, seeded by the first
/// observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialSmoothing {
    alpha: f64,
    state: Option<f64>,
}

impl ExponentialSmoothing {
    /// # Errors
    /// Returns [`MlearnError::InvalidParameter`] unless `0 < alpha ≤ 1`.
    pub fn new(alpha: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(MlearnError::InvalidParameter(format!(
                "alpha must be in (0, 1], got {alpha}"
            )));
        }
        Ok(Self { alpha, state: None })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Estimator for ExponentialSmoothing {
    fn add(&mut self, v: f64) {
        self.state = Some(match self.state {
            None => v,
            Some(s) => self.alpha * v + (1.0 - self.alpha) * s,
        });
    }

    fn estimation(&self) -> f64 {
        self.state.unwrap_or(f64::NAN)
    }
}

/// Daily temperatures with a weekly cycle:
/// `y[i] = 20 + 2·sin(2π·i/7) + N(0, noise)`.
pub fn generate_temperature_data(days: usize, noise: f64, seed: u64) -> Result<Vec<f64>> {
    let eps = normal_samples(&mut create_rng(seed), 0.0, noise, days)?;
    Ok(eps
        .into_iter()
        .enumerate()
        .map(|(i, e)| 20.0 + 2.0 * (2.0 * PI * i as f64 / 7.0).sin() + e)
        .collect())
}

/// One forecast made after observing every day before `day`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastStep {
    pub day: usize,
    pub actual: f64,
    pub predicted: f64,
    /// `predicted − actual`
    pub error: f64,
    /// Mean absolute error over days `1..=day`.
    pub running_mae: f64,
}

/// Result of replaying a series through an estimator.
#[derive(Debug, Clone, PartialEq)]
pub struct OnlineRun {
    pub actual: Vec<f64>,
    /// `predictions[0]` is the first observation; every later entry is the
    /// estimate available before that day's value was seen.
    pub predictions: Vec<f64>,
    pub steps: Vec<ForecastStep>,
    pub mae: f64,
}

impl OnlineRun {
    /// Replays `series` one value at a time, forecasting each day from the
    /// days before it.
    ///
    /// # Errors
    /// Returns [`MlearnError::EmptyData`] for a series shorter than two days.
    pub fn replay<E: Estimator>(estimator: &mut E, series: &[f64]) -> Result<Self> {
        if series.len() < 2 {
            return Err(MlearnError::EmptyData(
                "online replay needs at least two observations".into(),
            ));
        }

        estimator.add(series[0]);
        let mut predictions = Vec::with_capacity(series.len());
        predictions.push(estimator.estimation());

        let mut steps = Vec::with_capacity(series.len() - 1);
        let mut abs_error_sum = 0.0;
        for day in 1..series.len() {
            estimator.add(series[day - 1]);
            let predicted = estimator.estimation();
            let error = predicted - series[day];
            abs_error_sum += error.abs();
            predictions.push(predicted);
            steps.push(ForecastStep {
                day,
                actual: series[day],
                predicted,
                error,
                running_mae: abs_error_sum / day as f64,
            });
        }

        let mae = abs_error_sum / steps.len() as f64;
        debug!("replayed {} days, MAE {:.4}", series.len(), mae);
        Ok(Self {
            actual: series.to_vec(),
            predictions,
            steps,
            mae,
        })
    }

    /// Steps shown in the progress table: day 1, every fifth day and the
    /// last day.
    pub fn reported_steps(&self) -> impl Iterator<Item = &ForecastStep> {
        let last = self.actual.len() - 1;
        self.steps
            .iter()
            .filter(move |s| s.day == 1 || s.day % 5 == 0 || s.day == last)
    }

    pub fn last_prediction(&self) -> f64 {
        self.predictions.last().copied().unwrap_or(f64::NAN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_alpha_validation() {
        assert!(ExponentialSmoothing::new(0.0).is_err());
        assert!(ExponentialSmoothing::new(1.5).is_err());
        assert!(ExponentialSmoothing::new(f64::NAN).is_err());
        assert!(ExponentialSmoothing::new(1.0).is_ok());
    }

    #[test]
    fn test_first_observation_seeds_state() {
        let mut ema = ExponentialSmoothing::new(0.3).unwrap();
        assert!(ema.estimation().is_nan());
        ema.add(10.0);
        assert_eq!(ema.estimation(), 10.0);
        ema.add(20.0);
        assert_abs_diff_eq!(ema.estimation(), 13.0, epsilon = 1e-12);
    }

    #[test]
    fn test_replay_follows_recurrence() {
        let series = generate_temperature_data(30, 0.5, 42).unwrap();
        let mut ema = ExponentialSmoothing::new(0.3).unwrap();
        let run = OnlineRun::replay(&mut ema, &series).unwrap();

        assert_eq!(run.predictions.len(), 30);
        assert_eq!(run.predictions[0], series[0]);
        for i in 1..30 {
            let expected = 0.3 * series[i - 1] + 0.7 * run.predictions[i - 1];
            assert_abs_diff_eq!(run.predictions[i], expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_running_mae() {
        let mut ema = ExponentialSmoothing::new(0.5).unwrap();
        let run = OnlineRun::replay(&mut ema, &[0.0, 2.0, 2.0]).unwrap();
        // predictions: 0, 0, 1
        assert_eq!(run.predictions, vec![0.0, 0.0, 1.0]);
        assert_abs_diff_eq!(run.steps[0].running_mae, 2.0);
        assert_abs_diff_eq!(run.steps[1].running_mae, 1.5);
        assert_abs_diff_eq!(run.mae, 1.5);
        assert_eq!(run.last_prediction(), 1.0);
    }

    #[test]
    fn test_reported_days() {
        let series = generate_temperature_data(30, 0.5, 42).unwrap();
        let mut ema = ExponentialSmoothing::new(0.3).unwrap();
        let run = OnlineRun::replay(&mut ema, &series).unwrap();
        let days: Vec<usize> = run.reported_steps().map(|s| s.day).collect();
        assert_eq!(days, vec![1, 5, 10, 15, 20, 25, 29]);
    }

    #[test]
    fn test_temperature_pattern_without_noise_is_weekly() {
        let series = generate_temperature_data(15, 0.0, 42).unwrap();
        assert_abs_diff_eq!(series[0], 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(series[7], series[0], epsilon = 1e-9);
        assert_abs_diff_eq!(series[8], series[1], epsilon = 1e-9);
    }

    #[test]
    fn test_negative_noise_rejected() {
        assert!(matches!(
            generate_temperature_data(30, -0.5, 42),
            Err(MlearnError::Distribution(_))
        ));
    }

    #[test]
    fn test_short_series_rejected() {
        let mut ema = ExponentialSmoothing::new(0.3).unwrap();
        assert!(OnlineRun::replay(&mut ema, &[1.0]).is_err());
    }
}
