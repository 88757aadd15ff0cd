//! The normal distribution and helpers for drawing its density curve.
//!
//! | Item | Meaning |
//! |---|---|
//! | [`Normal`] | N(μ, σ²) with pdf, cdf and quantile |
//! | [`normal_pdf`] | closed-form density for one point |
//! | [`linspace`] | evenly spaced grid for plotting a curve |

pub mod special;

use crate::error::{MlearnError, Result};
use std::f64::consts::PI;

/// Normal (Gaussian) distribution N(μ, σ²).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    mu: f64,
    sigma: f64,
}

impl Normal {
    /// # Errors
    /// Returns [`MlearnError::Distribution`] unless both parameters are
    /// finite and `sigma > 0`.
    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        if !mu.is_finite() || !sigma.is_finite() || sigma <= 0.0 {
            return Err(MlearnError::Distribution(format!(
                "normal requires finite μ and σ > 0, got μ={mu}, σ={sigma}"
            )));
        }
        Ok(Self { mu, sigma })
    }

    pub fn mean(&self) -> f64 {
        self.mu
    }

    pub fn std_dev(&self) -> f64 {
        self.sigma
    }

    pub fn pdf(&self, x: f64) -> f64 {
        special::standard_normal_pdf(self.z_score(x)) / self.sigma
    }

    pub fn cdf(&self, x: f64) -> f64 {
        special::standard_normal_cdf(self.z_score(x))
    }

    /// `μ + σ·Φ⁻¹(p)`, `None` outside `(0, 1)`.
    pub fn quantile(&self, p: f64) -> Option<f64> {
        if p <= 0.0 || p >= 1.0 {
            return None;
        }
        Some(self.mu + self.sigma * special::standard_normal_quantile(p))
    }

    pub fn z_score(&self, x: f64) -> f64 {
        (x - self.mu) / self.sigma
    }

    /// `n` evenly spaced points over `μ ± k·σ` paired with their density.
    pub fn curve(&self, k: f64, n: usize) -> Vec<(f64, f64)> {
        linspace(self.mu - k * self.sigma, self.mu + k * self.sigma, n)
            .into_iter()
            .map(|x| (x, self.pdf(x)))
            .collect()
    }
}

/// Density of N(mean, std_dev²) at `x`, written out from the closed form
/// `exp(−(x−μ)²/(2σ²)) / (σ√(2π))`.
pub fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    let exponent = -((x - mean).powi(2)) / (2.0 * std_dev.powi(2));
    exponent.exp() / (std_dev * (2.0 * PI).sqrt())
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_manual_pdf_height_example() {
        let p = normal_pdf(180.0, 170.0, 10.0);
        assert_abs_diff_eq!(p, 0.0242, epsilon = 5e-5);
        assert_eq!(format!("{p:.4}"), "0.0242");
    }

    #[test]
    fn test_manual_pdf_agrees_with_distribution() {
        let n = Normal::new(70.0, 10.0).unwrap();
        for &x in &[40.0, 65.0, 70.0, 93.0] {
            assert_abs_diff_eq!(n.pdf(x), normal_pdf(x, 70.0, 10.0), epsilon = 1e-15);
        }
    }

    #[test]
    fn test_cdf_and_quantile() {
        let n = Normal::new(10.0, 2.0).unwrap();
        assert_abs_diff_eq!(n.cdf(10.0), 0.5, epsilon = 1e-7);
        assert_abs_diff_eq!(n.quantile(0.5).unwrap(), 10.0, epsilon = 1e-3);
        assert_eq!(n.quantile(1.0), None);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(Normal::new(0.0, 0.0).is_err());
        assert!(Normal::new(0.0, -1.0).is_err());
        assert!(Normal::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(30.0, 110.0, 1000);
        assert_eq!(xs.len(), 1000);
        assert_eq!(xs[0], 30.0);
        assert_eq!(xs[999], 110.0);
        assert!(xs.windows(2).all(|w| w[1] > w[0]));
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
    }

    #[test]
    fn test_curve_peaks_at_mean() {
        let n = Normal::new(70.0, 10.0).unwrap();
        let curve = n.curve(4.0, 101);
        let (x_peak, _) = curve
            .iter()
            .copied()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap();
        assert_abs_diff_eq!(x_peak, 70.0, epsilon = 1e-9);
    }
}
