//! Run configuration for the batch pipeline and the online predictor.
//!
//! Defaults reproduce the tutorial runs. A JSON file may override any
//! subset of fields; missing fields keep their default.

use crate::error::{MlearnError, Result};
use crate::random::DEFAULT_SEED;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Image format of rendered charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotFormat {
    #[default]
    Svg,
    Png,
}

impl PlotFormat {
    pub fn extension(self) -> &'static str {
        match self {
            PlotFormat::Svg => "svg",
            PlotFormat::Png => "png",
        }
    }
}

/// Settings for generate → train → predict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub n_samples: usize,
    pub seed: u64,
    /// Fraction of rows held out for evaluation.
    pub test_size: f64,
    pub data_dir: PathBuf,
    pub models_dir: PathBuf,
    pub predictions_dir: PathBuf,
    pub plot_format: PlotFormat,
    /// Newest model files kept after each save; `None` keeps all.
    pub max_models: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            n_samples: 1000,
            seed: DEFAULT_SEED,
            test_size: 0.2,
            data_dir: PathBuf::from("data"),
            models_dir: PathBuf::from("models"),
            predictions_dir: PathBuf::from("predictions"),
            plot_format: PlotFormat::Svg,
            max_models: Some(5),
        }
    }
}

impl PipelineConfig {
    /// Loads overrides from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_samples < 2 {
            return Err(MlearnError::InvalidParameter(format!(
                "n_samples must be at least 2, got {}",
                self.n_samples
            )));
        }
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(MlearnError::InvalidParameter(format!(
                "test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }
        if self.max_models == Some(0) {
            return Err(MlearnError::InvalidParameter(
                "max_models must keep at least one model".into(),
            ));
        }
        Ok(())
    }

    /// Re-roots the three artifact directories under `root`.
    pub fn with_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        let root = root.as_ref();
        self.data_dir = root.join(&self.data_dir);
        self.models_dir = root.join(&self.models_dir);
        self.predictions_dir = root.join(&self.predictions_dir);
        self
    }

    pub fn n_samples(mut self, n: usize) -> Self {
        self.n_samples = n;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    pub fn plot_format(mut self, format: PlotFormat) -> Self {
        self.plot_format = format;
        self
    }

    pub fn max_models(mut self, max_models: Option<usize>) -> Self {
        self.max_models = max_models;
        self
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.data_dir.join("house_prices.csv")
    }
}

/// Settings for the online temperature predictor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnlineConfig {
    pub days: usize,
    /// Standard deviation of the daily noise.
    pub noise: f64,
    /// Smoothing factor of the moving average.
    pub alpha: f64,
    pub seed: u64,
}

impl Default for OnlineConfig {
    fn default() -> Self {
        Self {
            days: 30,
            noise: 0.5,
            alpha: 0.3,
            seed: DEFAULT_SEED,
        }
    }
}

impl OnlineConfig {
    pub fn days(mut self, days: usize) -> Self {
        self.days = days;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_defaults() {
        let c = PipelineConfig::default();
        assert_eq!(c.n_samples, 1000);
        assert_eq!(c.seed, 42);
        assert_eq!(c.test_size, 0.2);
        assert_eq!(c.max_models, Some(5));
        assert_eq!(c.plot_format.extension(), "svg");
        assert_eq!(c.dataset_path(), PathBuf::from("data/house_prices.csv"));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let c = PipelineConfig::default()
            .n_samples(50)
            .seed(7)
            .test_size(0.3)
            .plot_format(PlotFormat::Png)
            .max_models(None);
        assert_eq!(c.n_samples, 50);
        assert_eq!(c.seed, 7);
        assert_eq!(c.test_size, 0.3);
        assert_eq!(c.plot_format, PlotFormat::Png);
        assert_eq!(c.max_models, None);
    }

    #[test]
    fn test_with_root() {
        let c = PipelineConfig::default().with_root("/tmp/run");
        assert_eq!(c.models_dir, PathBuf::from("/tmp/run/models"));
        assert_eq!(c.dataset_path(), PathBuf::from("/tmp/run/data/house_prices.csv"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"n_samples": 200, "plot_format": "png", "max_models": null}"#).unwrap();
        let c = PipelineConfig::from_json_file(&path).unwrap();
        assert_eq!(c.n_samples, 200);
        assert_eq!(c.plot_format, PlotFormat::Png);
        assert_eq!(c.max_models, None);
        assert_eq!(c.seed, 42);
        assert_eq!(c.models_dir, PathBuf::from("models"));
    }

    #[test]
    fn test_invalid_json_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"test_size": 1.5}"#).unwrap();
        assert!(matches!(
            PipelineConfig::from_json_file(&path),
            Err(MlearnError::InvalidParameter(_))
        ));
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            PipelineConfig::from_json_file(&path),
            Err(MlearnError::Config(_))
        ));
    }

    #[test]
    fn test_online_defaults_and_setters() {
        let c = OnlineConfig::default();
        assert_eq!((c.days, c.noise, c.alpha, c.seed), (30, 0.5, 0.3, 42));
        let c = c.days(10).alpha(0.5).seed(1);
        assert_eq!((c.days, c.alpha, c.seed), (10, 0.5, 1));
    }
}
