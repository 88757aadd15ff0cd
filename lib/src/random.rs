//! Seeded random number generation and sampling helpers.
//!
//! Every synthetic dataset in this crate is drawn from a [`StdRng`] created by
//! [`create_rng`], so a fixed seed reproduces the same values on every run of
//! the same build.

use crate::error::{MlearnError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Uniform};

/// Seed used by every tutorial program unless overridden.
pub const DEFAULT_SEED: u64 = 42;

/// Creates a deterministic generator for the given seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Draws `n` samples from `Normal(mean, std_dev)`.
///
/// # Errors
/// Returns [`MlearnError::Distribution`](crate::MlearnError::Distribution)
/// when `std_dev` is negative or not finite.
pub fn normal_samples<R: Rng>(rng: &mut R, mean: f64, std_dev: f64, n: usize) -> Result<Vec<f64>> {
    // rand_distr only checks finiteness; a negative scale would mirror the draws.
    if std_dev < 0.0 {
        return Err(MlearnError::Distribution(format!(
            "standard deviation must be non-negative, got {std_dev}"
        )));
    }
    let dist = Normal::new(mean, std_dev)?;
    Ok(dist.sample_iter(rng).take(n).collect())
}

/// Draws `n` samples uniformly from `[low, high)`.
pub fn uniform_samples<R: Rng>(rng: &mut R, low: f64, high: f64, n: usize) -> Result<Vec<f64>> {
    let dist = Uniform::new(low, high)?;
    Ok(dist.sample_iter(rng).take(n).collect())
}

/// Draws `n` integers uniformly from `[low, high)`.
pub fn integer_samples<R: Rng>(rng: &mut R, low: i64, high: i64, n: usize) -> Result<Vec<i64>> {
    let dist = Uniform::new(low, high)?;
    Ok(dist.sample_iter(rng).take(n).collect())
}

/// Returns a uniformly random permutation of `0..n`.
pub fn permutation<R: Rng>(rng: &mut R, n: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);
    indices
}
