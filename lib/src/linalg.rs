//! Dense linear solves for the normal equations.

use crate::error::{MlearnError, Result};
use ndarray::{Array1, Array2};

/// Pivots smaller than this fraction of the largest diagonal entry are
/// treated as zero.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Solves `a · x = b` by Gaussian elimination with partial pivoting.
///
/// # Errors
/// - [`MlearnError::InvalidParameter`] if `a` is not square or `b` does not
///   match its size.
/// - [`MlearnError::SingularMatrix`] if a pivot vanishes.
pub fn solve_linear_system(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>> {
    let n = a.nrows();
    if a.ncols() != n || b.len() != n {
        return Err(MlearnError::InvalidParameter(format!(
            "expected square system, got {}x{} matrix and rhs of length {}",
            a.nrows(),
            a.ncols(),
            b.len()
        )));
    }

    let mut m = a.clone();
    let mut rhs = b.clone();
    let scale = a.diag().iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let tolerance = PIVOT_TOLERANCE * scale.max(f64::MIN_POSITIVE);

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| m[[i, col]].abs().total_cmp(&m[[j, col]].abs()))
            .unwrap_or(col);
        if m[[pivot_row, col]].abs() <= tolerance {
            return Err(MlearnError::SingularMatrix(format!(
                "zero pivot in column {col}; features are linearly dependent"
            )));
        }
        if pivot_row != col {
            for k in 0..n {
                m.swap([col, k], [pivot_row, k]);
            }
            rhs.swap(col, pivot_row);
        }

        for row in col + 1..n {
            let factor = m[[row, col]] / m[[col, col]];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                m[[row, k]] -= factor * m[[col, k]];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut x = Array1::<f64>::zeros(n);
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| m[[row, k]] * x[k]).sum();
        x[row] = (rhs[row] - tail) / m[[row, row]];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_solves_small_system() {
        let a = array![[2.0, 1.0, -1.0], [-3.0, -1.0, 2.0], [-2.0, 1.0, 2.0]];
        let b = array![8.0, -11.0, -3.0];
        let x = solve_linear_system(&a, &b).unwrap();
        assert_abs_diff_eq!(x[0], 2.0, epsilon = 1e-10);
        assert_abs_diff_eq!(x[1], 3.0, epsilon = 1e-10);
        assert_abs_diff_eq!(x[2], -1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_requires_pivoting() {
        let a = array![[0.0, 1.0], [1.0, 0.0]];
        let b = array![3.0, 4.0];
        let x = solve_linear_system(&a, &b).unwrap();
        assert_abs_diff_eq!(x[0], 4.0);
        assert_abs_diff_eq!(x[1], 3.0);
    }

    #[test]
    fn test_singular_rejected() {
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        let b = array![1.0, 2.0];
        let err = solve_linear_system(&a, &b).unwrap_err();
        assert!(matches!(err, MlearnError::SingularMatrix(_)));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let a = Array2::<f64>::zeros((2, 3));
        let b = Array1::<f64>::zeros(2);
        assert!(matches!(
            solve_linear_system(&a, &b),
            Err(MlearnError::InvalidParameter(_))
        ));
    }
}
