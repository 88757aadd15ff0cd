pub mod linear;
pub mod state;

pub use state::{Fitted, Unfitted};

use crate::error::Result;
use crate::serialization::SerializableParams;
use log::debug;
use std::fs;
use std::path::Path;

/// Prediction and persistence interface of a fitted model.
pub trait InferenceModel {
    type InputSingle: ?Sized;
    type OutputSingle;
    type InputBatch;
    type OutputBatch;
    /// Plain-data snapshot written by [`save_to_file`](Self::save_to_file).
    type ParamsRepr: SerializableParams;

    fn predict(&self, input: &Self::InputSingle) -> Result<Self::OutputSingle>;

    fn predict_batch(&self, input: &Self::InputBatch) -> Result<Self::OutputBatch>;

    fn extract_params(&self) -> Self::ParamsRepr;

    fn from_params(params: Self::ParamsRepr) -> Result<Self>
    where
        Self: Sized;

    /// Writes the parameter blob to `path`, replacing any existing file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.extract_params().to_bytes()?;
        fs::write(path.as_ref(), &bytes)?;
        debug!("wrote {} bytes to {}", bytes.len(), path.as_ref().display());
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>
    where
        Self: Sized,
    {
        let bytes = fs::read(path.as_ref())?;
        Self::from_params(Self::ParamsRepr::from_bytes(&bytes)?)
    }
}
