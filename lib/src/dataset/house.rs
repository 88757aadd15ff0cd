//! Synthetic house-price records and their CSV form.

use crate::error::{MlearnError, Result};
use crate::random::{create_rng, integer_samples, normal_samples};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Input columns, in the order the model consumes them.
pub const FEATURE_COLUMNS: [&str; 3] = ["size_sqft", "bedrooms", "age_years"];

/// Column holding the regression target.
pub const TARGET_COLUMN: &str = "price";

const BASE_PRICE: f64 = 50_000.0;
const PRICE_PER_SQFT: f64 = 200.0;
const PRICE_PER_BEDROOM: f64 = 30_000.0;
const PRICE_PER_YEAR_OF_AGE: f64 = -1_000.0;
const PRICE_NOISE_STD: f64 = 10_000.0;

/// One row of the house-price dataset. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseRecord {
    pub size_sqft: i64,
    pub bedrooms: i64,
    pub age_years: i64,
    pub price: f64,
}

impl HouseRecord {
    /// Feature values in [`FEATURE_COLUMNS`] order.
    pub fn features(&self) -> [f64; 3] {
        [
            self.size_sqft as f64,
            self.bedrooms as f64,
            self.age_years as f64,
        ]
    }
}

/// Draws `n` records from the fixed generative model:
///
/// - `size_sqft = trunc(N(1500, 500))`
/// - `bedrooms ~ U{1..5}`, `age_years ~ U{0..49}`
/// - `price = 50000 + 200·size + 30000·bedrooms − 1000·age + N(0, 10000)`
pub fn generate_house_records(n: usize, seed: u64) -> Result<Vec<HouseRecord>> {
    let mut rng = create_rng(seed);
    let sizes = normal_samples(&mut rng, 1500.0, 500.0, n)?;
    let bedrooms = integer_samples(&mut rng, 1, 6, n)?;
    let ages = integer_samples(&mut rng, 0, 50, n)?;
    let noise = normal_samples(&mut rng, 0.0, PRICE_NOISE_STD, n)?;

    let records = sizes
        .into_iter()
        .zip(bedrooms)
        .zip(ages)
        .zip(noise)
        .map(|(((size, bedrooms), age_years), eps)| {
            let size_sqft = size.trunc() as i64;
            let price = BASE_PRICE
                + PRICE_PER_SQFT * size_sqft as f64
                + PRICE_PER_BEDROOM * bedrooms as f64
                + PRICE_PER_YEAR_OF_AGE * age_years as f64
                + eps;
            HouseRecord {
                size_sqft,
                bedrooms,
                age_years,
                price,
            }
        })
        .collect();
    debug!("generated {n} house records with seed {seed}");
    Ok(records)
}

/// Writes records with a `size_sqft,bedrooms,age_years,price` header,
/// creating the parent directory and replacing any existing file.
pub fn write_records_csv<P: AsRef<Path>>(path: P, records: &[HouseRecord]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!("wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Reads records back, rejecting files whose header differs from the
/// expected column layout.
pub fn read_records_csv<P: AsRef<Path>>(path: P) -> Result<Vec<HouseRecord>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let expected: Vec<String> = FEATURE_COLUMNS
        .iter()
        .chain(std::iter::once(&TARGET_COLUMN))
        .map(|c| c.to_string())
        .collect();
    let got: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if got != expected {
        return Err(MlearnError::SchemaMismatch { expected, got });
    }
    let records = reader
        .deserialize()
        .collect::<std::result::Result<Vec<HouseRecord>, _>>()?;
    debug!("read {} records from {}", records.len(), path.as_ref().display());
    Ok(records)
}
