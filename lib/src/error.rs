//! Error types shared by every module of the crate.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MlearnError>;

/// Error type for dataset, model, pipeline and plotting operations.
#[derive(Debug, Error)]
pub enum MlearnError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or unreadable CSV content.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Model (de)serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// Configuration file could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Chart rendering failure, carried as text because backend errors are generic.
    #[error("Plot error: {0}")]
    Plot(String),

    /// Invalid hyperparameter or argument value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Empty data provided where non-empty was required.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Number of input features does not match what the model was fitted on.
    #[error("Feature mismatch: expected {expected_features} features, got {got_features}")]
    FeatureMismatch {
        expected_features: usize,
        got_features: usize,
    },

    /// Column names or order differ from the schema the model was fitted on.
    #[error("Schema mismatch: expected columns {expected:?}, got {got:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        got: Vec<String>,
    },

    /// The normal equations have no unique solution.
    #[error("Singular matrix: {0}")]
    SingularMatrix(String),

    /// Distribution parameters rejected by `rand_distr`.
    #[error("Distribution error: {0}")]
    Distribution(String),
}

impl From<rand_distr::NormalError> for MlearnError {
    fn from(err: rand_distr::NormalError) -> Self {
        MlearnError::Distribution(err.to_string())
    }
}

impl From<rand_distr::uniform::Error> for MlearnError {
    fn from(err: rand_distr::uniform::Error) -> Self {
        MlearnError::Distribution(err.to_string())
    }
}
