//! Ordinary least squares linear regression.
//!
//! - [`LinearRegression`] = `LinearModel<Unfitted>`: knows only its feature
//!   schema and can be fitted.
//! - `LinearModel<Fitted>`: inference-only predictor, persisted through
//!   [`SerializableLinearParams`].
//!
//! Fitting solves the normal equations on mean-centered data, so the bias is
//! recovered as `ȳ − w·x̄` and the fitted plane passes through the point of
//! means.

use crate::error::{MlearnError, Result};
use crate::linalg::solve_linear_system;
pub use crate::model::{Fitted, InferenceModel, Unfitted};
use log::debug;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Weights, bias and the ordered feature names they apply to.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearParams {
    pub feature_names: Vec<String>,
    pub weights: Array1<f64>,
    pub bias: f64,
}

/// Serializable representation of linear model parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableLinearParams {
    pub feature_names: Vec<String>,
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl From<&LinearParams> for SerializableLinearParams {
    fn from(params: &LinearParams) -> Self {
        Self {
            feature_names: params.feature_names.clone(),
            weights: params.weights.to_vec(),
            bias: params.bias,
        }
    }
}

impl TryFrom<SerializableLinearParams> for LinearParams {
    type Error = MlearnError;

    fn try_from(value: SerializableLinearParams) -> Result<Self> {
        if value.weights.len() != value.feature_names.len() {
            return Err(MlearnError::FeatureMismatch {
                expected_features: value.feature_names.len(),
                got_features: value.weights.len(),
            });
        }
        Ok(Self {
            feature_names: value.feature_names,
            weights: Array1::from(value.weights),
            bias: value.bias,
        })
    }
}

/// A linear model with its training state encoded in the type.
///
/// Only `LinearModel<Fitted>` implements [`InferenceModel`], so an unfitted
/// model cannot be asked for predictions.
#[derive(Debug, Clone)]
pub struct LinearModel<S> {
    params: LinearParams,
    _state: PhantomData<S>,
}

/// Alias for an **unfitted** linear regression model.
pub type LinearRegression = LinearModel<Unfitted>;

impl<S> LinearModel<S> {
    pub fn feature_names(&self) -> &[String] {
        &self.params.feature_names
    }

    pub fn n_features(&self) -> usize {
        self.params.feature_names.len()
    }

    fn check_width(&self, got: usize) -> Result<()> {
        if got != self.n_features() {
            return Err(MlearnError::FeatureMismatch {
                expected_features: self.n_features(),
                got_features: got,
            });
        }
        Ok(())
    }
}

impl LinearRegression {
    /// Creates an unfitted model over the given ordered feature names, with
    /// zero-initialized weights.
    pub fn new<I, T>(feature_names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let feature_names: Vec<String> = feature_names.into_iter().map(Into::into).collect();
        let n = feature_names.len();
        Self {
            params: LinearParams {
                feature_names,
                weights: Array1::zeros(n),
                bias: 0.0,
            },
            _state: PhantomData,
        }
    }

    /// Fits ordinary least squares of `y` on the columns of `x`.
    ///
    /// # Errors
    /// - [`MlearnError::FeatureMismatch`] if `x` has a different number of
    ///   columns than the model has features.
    /// - [`MlearnError::InvalidParameter`] if `x` and `y` differ in rows.
    /// - [`MlearnError::EmptyData`] with fewer than two rows.
    /// - [`MlearnError::SingularMatrix`] if the centered features are
    ///   linearly dependent (e.g. a constant column).
    pub fn fit(self, x: &Array2<f64>, y: &Array1<f64>) -> Result<LinearModel<Fitted>> {
        self.check_width(x.ncols())?;
        if x.nrows() != y.len() {
            return Err(MlearnError::InvalidParameter(format!(
                "x has {} rows but y has {} values",
                x.nrows(),
                y.len()
            )));
        }
        if x.nrows() < 2 {
            return Err(MlearnError::EmptyData(
                "least squares needs at least two rows".into(),
            ));
        }

        let x_mean = x
            .mean_axis(Axis(0))
            .ok_or_else(|| MlearnError::EmptyData("no rows to average".into()))?;
        let y_mean = y
            .mean()
            .ok_or_else(|| MlearnError::EmptyData("no targets to average".into()))?;

        let xc = x - &x_mean;
        let yc = y - y_mean;
        let gram = xc.t().dot(&xc);
        let moment = xc.t().dot(&yc);
        let weights = solve_linear_system(&gram, &moment)?;
        let bias = y_mean - weights.dot(&x_mean);

        debug!(
            "fitted {} rows: weights={:?}, bias={:.4}",
            x.nrows(),
            weights.to_vec(),
            bias
        );

        Ok(LinearModel {
            params: LinearParams {
                feature_names: self.params.feature_names,
                weights,
                bias,
            },
            _state: PhantomData,
        })
    }
}

impl LinearModel<Fitted> {
    /// Wraps already-trained parameters.
    pub fn from_linear_params(params: LinearParams) -> Self {
        Self {
            params,
            _state: PhantomData,
        }
    }

    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.params.weights.view()
    }

    pub fn bias(&self) -> f64 {
        self.params.bias
    }

    /// `(feature name, weight)` pairs in schema order.
    pub fn coefficients(&self) -> Vec<(&str, f64)> {
        self.params
            .feature_names
            .iter()
            .map(String::as_str)
            .zip(self.params.weights.iter().copied())
            .collect()
    }

    /// Verifies that `columns` names the same features, in the same order,
    /// as the model was fitted on.
    pub fn check_schema<T: AsRef<str>>(&self, columns: &[T]) -> Result<()> {
        let same = columns.len() == self.n_features()
            && columns
                .iter()
                .zip(&self.params.feature_names)
                .all(|(c, f)| c.as_ref() == f);
        if same {
            return Ok(());
        }
        Err(MlearnError::SchemaMismatch {
            expected: self.params.feature_names.clone(),
            got: columns.iter().map(|c| c.as_ref().to_string()).collect(),
        })
    }
}

/// Inference for a fitted linear model: `y = wᵀx + b`.
///
/// - Single sample: `[f64]` → `f64`
/// - Batch: `Array2<f64>` (rows are samples) → `Array1<f64>`
impl InferenceModel for LinearModel<Fitted> {
    type InputSingle = [f64];
    type OutputSingle = f64;
    type InputBatch = Array2<f64>;
    type OutputBatch = Array1<f64>;
    type ParamsRepr = SerializableLinearParams;

    fn predict(&self, input: &[f64]) -> Result<f64> {
        self.check_width(input.len())?;
        let dot: f64 = self
            .params
            .weights
            .iter()
            .zip(input)
            .map(|(w, x)| w * x)
            .sum();
        Ok(dot + self.params.bias)
    }

    fn predict_batch(&self, input: &Array2<f64>) -> Result<Array1<f64>> {
        self.check_width(input.ncols())?;
        Ok(input.dot(&self.params.weights) + self.params.bias)
    }

    fn extract_params(&self) -> SerializableLinearParams {
        (&self.params).into()
    }

    fn from_params(params: SerializableLinearParams) -> Result<Self> {
        Ok(Self::from_linear_params(LinearParams::try_from(params)?))
    }
}
