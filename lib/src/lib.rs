//! # mlearn-rs
//!
//! Building blocks for the day-by-day machine learning tutorials:
//! descriptive statistics, normal-distribution utilities, an online
//! exponential-smoothing forecaster and a batch linear-regression pipeline
//! with typed model persistence.
//!
//! ## Core Design Principles
//!
//! - **Stateful Type Safety**: models carry their training state in the type
//!   system (`Unfitted` vs `Fitted`), so only a fitted model can predict or be
//!   saved.
//! - **Schema Awareness**: a fitted model remembers the ordered feature names
//!   it was trained on and rejects inputs of another shape or schema.
//! - **Reproducibility**: every random draw goes through a seeded generator,
//!   so a given seed always yields the same data within this crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use mlearn::model::linear::LinearRegression;
//! use mlearn::model::InferenceModel;
//! use ndarray::array;
//!
//! // y = 2·x + 1
//! let x = array![[0.0], [1.0], [2.0], [3.0]];
//! let y = array![1.0, 3.0, 5.0, 7.0];
//!
//! let model = LinearRegression::new(["x"]).fit(&x, &y)?;
//! let pred = model.predict(&[4.0])?;
//! assert!((pred - 9.0).abs() < 1e-9);
//! # Ok::<(), mlearn::MlearnError>(())
//! ```
//!
//! ## Module Structure
//!
//! - `stats`: summaries, quantiles, correlation, binning and crosstabs
//! - `distributions`: normal density, CDF and quantile
//! - `dataset`: the house-price dataset and its CSV form
//! - `model`: linear regression with stateful type parameters
//! - `pipeline`: generate → train → predict over the file system
//! - `online`: incremental estimators and one-step-ahead replay
//! - `plot`: chart rendering (feature `plot`)

/// Run configuration for the pipeline and the online predictor.
pub mod config;

/// Data loading utilities and dataset abstractions.
pub mod dataset;

/// Normal distribution and its special functions.
pub mod distributions;

pub mod error;

/// Dense linear solvers.
pub mod linalg;

/// Regression quality metrics.
pub mod metrics;

/// Machine learning models with compile-time state safety.
pub mod model;

/// Incremental estimators.
pub mod online;

/// Batch training and prediction workflow.
pub mod pipeline;

/// Chart rendering.
#[cfg(feature = "plot")]
pub mod plot;

/// Seeded random sampling.
pub mod random;

/// Model persistence formats.
pub mod serialization;

/// Descriptive statistics.
pub mod stats;

/// Fixed and seeded tutorial datasets.
pub mod synthetic;

pub use error::{MlearnError, Result};

