//! Least squares solver for the demo bundle's linear model.
//!
//! We solve
//!
//! ```text
//! minimize Σ (y_i - b - x_i^T β)^2
//! ```
//!
//! on already-scaled features. The demo data never varies
//! `property_type_encoded`, so after scaling that column is all zeros and the
//! design matrix is rank-deficient. SVD handles that: singular directions below the tolerance
//! get a zero coefficient instead of blowing up.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Fit `y ≈ intercept + rows · coefficients`.
///
/// Returns `(intercept, coefficients)`, or `None` for empty/ragged input or an
/// unsolvable system.
pub fn fit_with_intercept(rows: &[Vec<f64>], y: &[f64]) -> Option<(f64, Vec<f64>)> {
    let n = rows.len();
    let k = rows.first()?.len();
    if n == 0 || n != y.len() || rows.iter().any(|r| r.len() != k) {
        return None;
    }

    let design = DMatrix::from_fn(n, k + 1, |i, j| if j == 0 { 1.0 } else { rows[i][j - 1] });
    let target = DVector::from_column_slice(y);
    let beta = solve_least_squares(&design, &target)?;

    Some((beta[0], beta.iter().skip(1).copied().collect()))
}
