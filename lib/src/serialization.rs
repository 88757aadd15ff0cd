//! Serialization of fitted model parameters.
//!
//! Parameter representations are plain numeric data (vectors, scalars,
//! names) and never hold references into a live model, so a blob written by
//! one process can be loaded by another.

use crate::error::Result;

/// Parameter representations that can round-trip through bytes.
pub trait SerializableParams: Sized {
    fn to_bytes(&self) -> Result<Vec<u8>>;

    fn from_bytes(bytes: &[u8]) -> Result<Self>;
}

/// Any serde type is stored as a bincode blob.
impl<T> SerializableParams for T
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de>,
{
    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Params {
        names: Vec<String>,
        values: Vec<f64>,
    }

    #[test]
    fn test_bytes_round_trip() {
        let p = Params {
            names: vec!["a".into(), "b".into()],
            values: vec![1.5, -2.0],
        };
        let bytes = p.to_bytes().unwrap();
        assert_eq!(Params::from_bytes(&bytes).unwrap(), p);
    }

    #[test]
    fn test_truncated_bytes_rejected() {
        let bytes = vec![1.0f64, 2.0].to_bytes().unwrap();
        assert!(Vec::<f64>::from_bytes(&bytes[..bytes.len() - 3]).is_err());
    }
}
