//! Batch house-price workflow: generate → train → predict.
//!
//! Stages communicate through the file system, the same way the command-line
//! program runs them: the dataset is a CSV under `data_dir`, fitted models
//! are timestamped bincode blobs under `models_dir` and prediction batches
//! are timestamped CSVs under `predictions_dir`.

use crate::config::PipelineConfig;
use crate::dataset::{
    generate_house_records, read_records_csv, write_records_csv, HousePriceDataset,
    FEATURE_COLUMNS,
};
use crate::error::{MlearnError, Result};
use crate::metrics::{Metrics, RegressionMetrics};
use crate::model::linear::{LinearModel, LinearRegression};
use crate::model::{Fitted, InferenceModel};
use chrono::Local;
use log::{debug, info, warn};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const MODEL_PREFIX: &str = "house_price_model_";
const MODEL_EXTENSION: &str = "bin";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TIMESTAMP_LEN: usize = 15;

/// Houses priced by [`make_predictions`]: `[size_sqft, bedrooms, age_years]`.
pub const PREDICTION_BATCH: [[i64; 3]; 3] = [[1200, 2, 5], [1800, 3, 10], [2200, 4, 2]];

/// Outcome of [`train_model`].
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub model_path: PathBuf,
    pub train_rows: usize,
    pub test_rows: usize,
    /// Held-out metrics.
    pub metrics: RegressionMetrics,
    pub coefficients: Vec<(String, f64)>,
    pub bias: f64,
    /// Older model files deleted by the retention policy.
    pub pruned: Vec<PathBuf>,
    pub chart_path: Option<PathBuf>,
}

/// One priced house, also the row layout of the predictions CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRow {
    pub size_sqft: i64,
    pub bedrooms: i64,
    pub age_years: i64,
    pub predicted_price: f64,
}

#[derive(Debug, Clone)]
pub struct PredictionReport {
    pub path: PathBuf,
    pub rows: Vec<PredictionRow>,
}

impl fmt::Display for PredictionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>10} {:>9} {:>10} {:>16}",
            "size_sqft", "bedrooms", "age_years", "predicted_price"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:>10} {:>9} {:>10} {:>16.2}",
                row.size_sqft, row.bedrooms, row.age_years, row.predicted_price
            )?;
        }
        Ok(())
    }
}

/// Everything one [`run_pipeline`] call produced.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// `false` when an existing dataset was reused.
    pub generated: bool,
    pub dataset_path: PathBuf,
    pub training: TrainingReport,
    pub predictions: PredictionReport,
}

/// Writes `config.n_samples` seeded records to [`PipelineConfig::dataset_path`],
/// replacing any existing file.
pub fn generate_sample_data(config: &PipelineConfig) -> Result<PathBuf> {
    config.validate()?;
    let path = config.dataset_path();
    if path.exists() {
        warn!("overwriting dataset {}", path.display());
    }
    let records = generate_house_records(config.n_samples, config.seed)?;
    write_records_csv(&path, &records)?;
    Ok(path)
}

/// Fits OLS on a seeded train split of the dataset, evaluates it on the
/// held-out rows and saves it under `models_dir`.
pub fn train_model(config: &PipelineConfig) -> Result<TrainingReport> {
    config.validate()?;
    let dataset = HousePriceDataset::from_records(&read_records_csv(config.dataset_path())?);
    let (train, test) = dataset.train_test_split(config.test_size, config.seed)?;
    info!("training on {} rows, evaluating on {}", train.len(), test.len());

    let model = LinearRegression::new(train.feature_names().iter().cloned())
        .fit(train.features(), train.target())?;
    let y_pred = model.predict_batch(test.features())?;
    let metrics = Metrics::calculate_all(&test.target().to_vec(), &y_pred.to_vec());
    info!("held-out {metrics}");

    fs::create_dir_all(&config.models_dir)?;
    let stem = format!("{MODEL_PREFIX}{}", timestamp());
    let model_path = unique_path(&config.models_dir, &stem, MODEL_EXTENSION);
    model.save_to_file(&model_path)?;
    info!("model saved to {}", model_path.display());

    let pruned = match config.max_models {
        Some(keep) => prune_models(&config.models_dir, keep)?,
        None => Vec::new(),
    };

    #[cfg(feature = "plot")]
    let chart_path = Some(save_feature_importance(&model, config)?);
    #[cfg(not(feature = "plot"))]
    let chart_path = None;

    Ok(TrainingReport {
        model_path,
        train_rows: train.len(),
        test_rows: test.len(),
        metrics,
        coefficients: model
            .coefficients()
            .into_iter()
            .map(|(name, w)| (name.to_string(), w))
            .collect(),
        bias: model.bias(),
        pruned,
        chart_path,
    })
}

#[cfg(feature = "plot")]
fn save_feature_importance(model: &LinearModel<Fitted>, config: &PipelineConfig) -> Result<PathBuf> {
    use crate::plot::{save_chart, BarChart};

    let chart = BarChart::new("Feature Importance (Coefficients)", model.coefficients())
        .x_label("Coefficient Value")
        .sorted_ascending();
    let path = config
        .models_dir
        .join(format!("feature_importance.{}", config.plot_format.extension()));
    save_chart(&chart, &path)?;
    Ok(path)
}

/// Loads the model at `model_path`, prices [`PREDICTION_BATCH`] and writes
/// the result under `predictions_dir`.
///
/// # Errors
/// Returns [`MlearnError::SchemaMismatch`] when the model was fitted on
/// other columns than the house features.
pub fn make_predictions<P: AsRef<Path>>(config: &PipelineConfig, model_path: P) -> Result<PredictionReport> {
    let model = LinearModel::<Fitted>::load_from_file(model_path.as_ref())?;
    model.check_schema(&FEATURE_COLUMNS)?;
    debug!("loaded model from {}", model_path.as_ref().display());

    let flat: Vec<f64> = PREDICTION_BATCH.iter().flatten().map(|&v| v as f64).collect();
    let batch = Array2::from_shape_vec((PREDICTION_BATCH.len(), FEATURE_COLUMNS.len()), flat)
        .map_err(|e| MlearnError::InvalidParameter(e.to_string()))?;
    let prices = model.predict_batch(&batch)?;

    let rows: Vec<PredictionRow> = PREDICTION_BATCH
        .iter()
        .zip(prices.iter())
        .map(|(&[size_sqft, bedrooms, age_years], &price)| PredictionRow {
            size_sqft,
            bedrooms,
            age_years,
            predicted_price: (price * 100.0).round_ties_even() / 100.0,
        })
        .collect();

    fs::create_dir_all(&config.predictions_dir)?;
    let stem = format!("predictions_{}", timestamp());
    let path = unique_path(&config.predictions_dir, &stem, "csv");
    let mut writer = csv::Writer::from_path(&path)?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!("predictions saved to {}", path.display());

    Ok(PredictionReport { path, rows })
}

/// Runs the three stages. The dataset is generated only when it does not
/// exist yet.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineRun> {
    config.validate()?;
    let dataset_path = config.dataset_path();
    let generated = !dataset_path.exists();
    if generated {
        generate_sample_data(config)?;
    } else {
        info!("reusing dataset {}", dataset_path.display());
    }
    let training = train_model(config)?;
    let predictions = make_predictions(config, &training.model_path)?;
    Ok(PipelineRun {
        generated,
        dataset_path,
        training,
        predictions,
    })
}

/// Deletes all but the newest `keep` model files in `dir`. Age is read from
/// the timestamp in the file name, so copies keep their order.
pub fn prune_models<P: AsRef<Path>>(dir: P, keep: usize) -> Result<Vec<PathBuf>> {
    let mut models: Vec<((String, u32), PathBuf)> = fs::read_dir(dir.as_ref())?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter_map(|path| {
            let key = path.file_name()?.to_str().and_then(model_sort_key)?;
            Some((key, path))
        })
        .collect();
    if models.len() <= keep {
        return Ok(Vec::new());
    }
    models.sort();

    let excess = models.len() - keep;
    let mut removed = Vec::with_capacity(excess);
    for (_, path) in models.into_iter().take(excess) {
        fs::remove_file(&path)?;
        warn!("removed old model {}", path.display());
        removed.push(path);
    }
    Ok(removed)
}

/// `(timestamp, collision counter)` of a model file name.
fn model_sort_key(name: &str) -> Option<(String, u32)> {
    let rest = name
        .strip_prefix(MODEL_PREFIX)?
        .strip_suffix(MODEL_EXTENSION)?
        .strip_suffix('.')?;
    let stamp = rest.get(..TIMESTAMP_LEN)?;
    let counter = match &rest[TIMESTAMP_LEN..] {
        "" => 0,
        suffix => suffix.strip_prefix('_')?.parse().ok()?,
    };
    Some((stamp.to_string(), counter))
}

fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// `dir/stem.ext`, or `dir/stem_N.ext` with the smallest free `N`.
fn unique_path(dir: &Path, stem: &str, ext: &str) -> PathBuf {
    let mut path = dir.join(format!("{stem}.{ext}"));
    let mut n = 1;
    while path.exists() {
        path = dir.join(format!("{stem}_{n}.{ext}"));
        n += 1;
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlotFormat;
    use crate::model::linear::LinearParams;
    use ndarray::array;

    fn config(root: &Path) -> PipelineConfig {
        PipelineConfig::default().n_samples(200).with_root(root)
    }

    #[test]
    fn test_model_sort_key() {
        assert_eq!(
            model_sort_key("house_price_model_20260101_120000.bin"),
            Some(("20260101_120000".to_string(), 0))
        );
        assert_eq!(
            model_sort_key("house_price_model_20260101_120000_12.bin"),
            Some(("20260101_120000".to_string(), 12))
        );
        assert_eq!(model_sort_key("feature_importance.svg"), None);
        assert_eq!(model_sort_key("house_price_model_2026.bin"), None);
        assert_eq!(model_sort_key("house_price_model_20260101_120000x.bin"), None);
    }

    #[test]
    fn test_unique_path_adds_counter() {
        let dir = tempfile::tempdir().unwrap();
        let first = unique_path(dir.path(), "m", "bin");
        assert_eq!(first, dir.path().join("m.bin"));
        fs::write(&first, b"x").unwrap();
        assert_eq!(unique_path(dir.path(), "m", "bin"), dir.path().join("m_1.bin"));
    }

    #[test]
    fn test_prune_keeps_newest() {
        let dir = tempfile::tempdir().unwrap();
        let names = [
            "house_price_model_20260101_120000.bin",
            "house_price_model_20260101_120000_2.bin",
            "house_price_model_20260101_120000_10.bin",
            "house_price_model_20260102_080000.bin",
            "feature_importance.svg",
        ];
        for name in names {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        let removed = prune_models(dir.path(), 2).unwrap();
        assert_eq!(
            removed,
            vec![dir.path().join(names[0]), dir.path().join(names[1])]
        );
        assert!(dir.path().join(names[2]).exists());
        assert!(dir.path().join(names[3]).exists());
        assert!(dir.path().join(names[4]).exists());
        assert!(prune_models(dir.path(), 5).unwrap().is_empty());
    }

    #[test]
    fn test_generate_then_train() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let path = generate_sample_data(&config).unwrap();
        assert_eq!(path, dir.path().join("data/house_prices.csv"));

        let report = train_model(&config).unwrap();
        assert_eq!((report.train_rows, report.test_rows), (160, 40));
        assert!(report.metrics.r_squared > 0.9, "{}", report.metrics);
        assert!(report.model_path.exists());
        assert!(report
            .model_path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(MODEL_PREFIX)));
        let names: Vec<&str> = report.coefficients.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, FEATURE_COLUMNS);
        if cfg!(feature = "plot") {
            assert_eq!(report.chart_path, Some(dir.path().join("models/feature_importance.svg")));
        }
    }

    #[cfg(feature = "plot")]
    #[test]
    fn test_train_writes_png_feature_importance() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path()).plot_format(PlotFormat::Png);
        generate_sample_data(&config).unwrap();
        let report = train_model(&config).unwrap();
        let chart = report.chart_path.unwrap();
        assert_eq!(chart, dir.path().join("models/feature_importance.png"));
        assert_eq!(&fs::read(&chart).unwrap()[1..4], b"PNG");
    }

    #[test]
    fn test_training_prunes_old_models() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path()).max_models(Some(1));
        generate_sample_data(&config).unwrap();
        let first = train_model(&config).unwrap();
        let second = train_model(&config).unwrap();
        assert_eq!(second.pruned, vec![first.model_path.clone()]);
        assert!(!first.model_path.exists());
        assert!(second.model_path.exists());
    }

    #[test]
    fn test_predictions_csv() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let run = run_pipeline(&config).unwrap();
        assert!(run.generated);

        let rows = &run.predictions.rows;
        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].size_sqft, rows[0].bedrooms, rows[0].age_years), (1200, 2, 5));
        assert!(rows
            .iter()
            .all(|r| ((r.predicted_price * 100.0).round() - r.predicted_price * 100.0).abs() < 1e-6));
        assert!(rows[2].predicted_price > rows[0].predicted_price);

        let text = fs::read_to_string(&run.predictions.path).unwrap();
        assert!(text.starts_with("size_sqft,bedrooms,age_years,predicted_price\n"));
        assert_eq!(text.lines().count(), 4);

        assert!(!run_pipeline(&config).unwrap().generated);
    }

    #[test]
    fn test_predict_rejects_foreign_schema() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let model = LinearModel::<Fitted>::from_linear_params(LinearParams {
            feature_names: vec!["sqft".into(), "beds".into(), "age".into()],
            weights: array![1.0, 2.0, 3.0],
            bias: 0.0,
        });
        let path = dir.path().join("foreign.bin");
        model.save_to_file(&path).unwrap();
        assert!(matches!(
            make_predictions(&config, &path),
            Err(MlearnError::SchemaMismatch { .. })
        ));
    }
}
