//! Standard normal density, CDF and quantile approximations.

/// 1/√(2π)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Standard normal PDF φ(x) = (1/√(2π)) exp(-x²/2).
pub fn standard_normal_pdf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard normal CDF Φ(x) = P(Z ≤ x).
///
/// Abramowitz & Stegun 26.2.17, absolute error below 7.5e-8.
pub fn standard_normal_cdf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x.is_infinite() {
        return if x > 0.0 { 1.0 } else { 0.0 };
    }

    let ax = x.abs();
    let k = 1.0 / (1.0 + 0.231_641_9 * ax);
    let poly = k
        * (0.319_381_530
            + k * (-0.356_563_782 + k * (1.781_477_937 + k * (-1.821_255_978 + k * 1.330_274_429))));
    let upper_tail = standard_normal_pdf(ax) * poly;

    if x >= 0.0 {
        1.0 - upper_tail
    } else {
        upper_tail
    }
}

/// Inverse of [`standard_normal_cdf`]: returns `z` with `Φ(z) = p`.
///
/// Abramowitz & Stegun 26.2.23, absolute error below 4.5e-4.
/// Returns NaN outside `[0, 1]` and ±∞ at the endpoints.
pub fn standard_normal_quantile(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    let (q, sign) = if p > 0.5 { (1.0 - p, 1.0) } else { (p, -1.0) };
    let t = (-2.0 * q.ln()).sqrt();

    const C: [f64; 3] = [2.515_517, 0.802_853, 0.010_328];
    const D: [f64; 3] = [1.432_788, 0.189_269, 0.001_308];
    let num = C[0] + t * (C[1] + t * C[2]);
    let den = 1.0 + t * (D[0] + t * (D[1] + t * D[2]));

    sign * (t - num / den)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_cdf_reference_points() {
        assert_abs_diff_eq!(standard_normal_cdf(0.0), 0.5, epsilon = 1e-7);
        assert_abs_diff_eq!(standard_normal_cdf(1.0), 0.841_344_746, epsilon = 1e-7);
        assert_abs_diff_eq!(standard_normal_cdf(-1.96), 0.024_997_895, epsilon = 1e-7);
        assert_eq!(standard_normal_cdf(f64::INFINITY), 1.0);
        assert_eq!(standard_normal_cdf(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_cdf_symmetric() {
        for &x in &[0.3, 1.1, 2.5] {
            assert_abs_diff_eq!(
                standard_normal_cdf(x) + standard_normal_cdf(-x),
                1.0,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_pdf_peak() {
        assert_abs_diff_eq!(standard_normal_pdf(0.0), FRAC_1_SQRT_2PI, epsilon = 1e-15);
        assert!(standard_normal_pdf(f64::NAN).is_nan());
    }

    #[test]
    fn test_quantile_inverts_cdf() {
        assert_abs_diff_eq!(standard_normal_quantile(0.5), 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(standard_normal_quantile(0.975), 1.96, epsilon = 1e-3);
        for &p in &[0.05, 0.3, 0.8] {
            let z = standard_normal_quantile(p);
            assert_abs_diff_eq!(standard_normal_cdf(z), p, epsilon = 1e-3);
        }
        assert!(standard_normal_quantile(1.5).is_nan());
        assert_eq!(standard_normal_quantile(0.0), f64::NEG_INFINITY);
    }
}
