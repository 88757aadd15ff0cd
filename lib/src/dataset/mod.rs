//! Tabular datasets for regression.
//!
//! A [`HousePriceDataset`] holds a feature matrix of shape
//! `(n_samples, n_features)`, a target vector of length `n_samples` and the
//! ordered feature names that travel with a fitted model.

pub mod house;

pub use house::{
    generate_house_records, read_records_csv, write_records_csv, HouseRecord, FEATURE_COLUMNS,
    TARGET_COLUMN,
};

use crate::error::{MlearnError, Result};
use crate::random::{create_rng, permutation};
use ndarray::{Array1, Array2, Axis};

/// In-memory regression dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct HousePriceDataset {
    feature_names: Vec<String>,
    features: Array2<f64>,
    target: Array1<f64>,
}

impl HousePriceDataset {
    /// # Errors
    /// Returns [`MlearnError::InvalidParameter`] if the shapes disagree.
    pub fn new(feature_names: Vec<String>, features: Array2<f64>, target: Array1<f64>) -> Result<Self> {
        if features.ncols() != feature_names.len() || features.nrows() != target.len() {
            return Err(MlearnError::InvalidParameter(format!(
                "features {:?} do not match {} names and {} targets",
                features.dim(),
                feature_names.len(),
                target.len()
            )));
        }
        Ok(Self {
            feature_names,
            features,
            target,
        })
    }

    pub fn from_records(records: &[HouseRecord]) -> Self {
        let n = records.len();
        let mut features = Array2::<f64>::zeros((n, FEATURE_COLUMNS.len()));
        for (mut row, record) in features.axis_iter_mut(Axis(0)).zip(records) {
            row.assign(&Array1::from(record.features().to_vec()));
        }
        let target = records.iter().map(|r| r.price).collect();
        Self {
            feature_names: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            features,
            target,
        }
    }

    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    pub fn target(&self) -> &Array1<f64> {
        &self.target
    }

    /// Rows at `indices`, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            feature_names: self.feature_names.clone(),
            features: self.features.select(Axis(0), indices),
            target: self.target.select(Axis(0), indices),
        }
    }

    /// Shuffled train/test split.
    ///
    /// A seeded permutation of the row indices is drawn; the first
    /// `ceil(test_size · n)` indices form the test set and the rest the
    /// training set, both in permutation order.
    ///
    /// # Errors
    /// - [`MlearnError::InvalidParameter`] unless `0 < test_size < 1`.
    /// - [`MlearnError::EmptyData`] if either side would be empty.
    pub fn train_test_split(&self, test_size: f64, seed: u64) -> Result<(Self, Self)> {
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(MlearnError::InvalidParameter(format!(
                "test_size must be in (0, 1), got {test_size}"
            )));
        }
        let n = self.len();
        let n_test = (test_size * n as f64).ceil() as usize;
        if n_test == 0 || n_test >= n {
            return Err(MlearnError::EmptyData(format!(
                "cannot split {n} rows with test_size {test_size}"
            )));
        }

        let order = permutation(&mut create_rng(seed), n);
        let (test_idx, train_idx) = order.split_at(n_test);
        Ok((self.select_rows(train_idx), self.select_rows(test_idx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(n: usize) -> HousePriceDataset {
        HousePriceDataset::from_records(&generate_house_records(n, 42).unwrap())
    }

    #[test]
    fn test_from_records_layout() {
        let records = generate_house_records(5, 3).unwrap();
        let ds = HousePriceDataset::from_records(&records);
        assert_eq!(ds.len(), 5);
        assert_eq!(ds.n_features(), 3);
        assert_eq!(ds.feature_names(), &["size_sqft", "bedrooms", "age_years"]);
        assert_eq!(ds.features()[[2, 1]], records[2].bedrooms as f64);
        assert_eq!(ds.target()[4], records[4].price);
    }

    #[test]
    fn test_new_rejects_shape_mismatch() {
        let err = HousePriceDataset::new(
            vec!["a".into()],
            Array2::zeros((3, 2)),
            Array1::zeros(3),
        )
        .unwrap_err();
        assert!(matches!(err, MlearnError::InvalidParameter(_)));
    }

    #[test]
    fn test_split_sizes_use_ceiling() {
        let ds = dataset(1001);
        let (train, test) = ds.train_test_split(0.2, 42).unwrap();
        assert_eq!(test.len(), 201);
        assert_eq!(train.len(), 800);
    }

    #[test]
    fn test_split_is_disjoint_and_complete() {
        let ds = dataset(100);
        let (train, test) = ds.train_test_split(0.2, 42).unwrap();
        let mut prices: Vec<f64> = train.target().iter().chain(test.target()).copied().collect();
        let mut original = ds.target().to_vec();
        prices.sort_by(f64::total_cmp);
        original.sort_by(f64::total_cmp);
        assert_eq!(prices, original);
    }

    #[test]
    fn test_split_is_seeded() {
        let ds = dataset(60);
        assert_eq!(
            ds.train_test_split(0.2, 42).unwrap(),
            ds.train_test_split(0.2, 42).unwrap()
        );
        assert_ne!(
            ds.train_test_split(0.2, 42).unwrap().1,
            ds.train_test_split(0.2, 1).unwrap().1
        );
    }

    #[test]
    fn test_split_rejects_bad_sizes() {
        let ds = dataset(10);
        assert!(ds.train_test_split(0.0, 42).is_err());
        assert!(ds.train_test_split(1.0, 42).is_err());
        assert!(matches!(
            dataset(1).train_test_split(0.5, 42),
            Err(MlearnError::EmptyData(_))
        ));
    }
}
