//! Ordinary least squares via the normal equations.
//!
//! The design matrices here are small (accepted rows × summary dimensions),
//! so the solver forms `XᵀX` and eliminates with partial pivoting rather than
//! pulling in a full decomposition library.

use ndarray::Array2;

use crate::error::AdjustError;

/// Relative pivot tolerance for rank-deficiency detection.
const PIVOT_RTOL: f64 = 1e-10;

/// Solves `X β = Y` in the least-squares sense.
///
/// Forms the normal equations `(XᵀX) β = XᵀY` and solves them by Gaussian
/// elimination with partial pivoting. Returns `β` with shape
/// `(x.ncols(), y.ncols())`.
///
/// # Errors
///
/// Returns [`AdjustError::SingularDesign`] when a pivot falls below the
/// relative tolerance, i.e. the design matrix is rank-deficient.
pub(crate) fn solve_least_squares(
    x: &Array2<f64>,
    y: &Array2<f64>,
) -> Result<Array2<f64>, AdjustError> {
    debug_assert_eq!(x.nrows(), y.nrows());

    let c = x.ncols();
    let p = y.ncols();

    // Normal equations: gram = XᵀX (c×c), rhs = XᵀY (c×p)
    let xt = x.t();
    let mut gram = xt.dot(x);
    let mut rhs = xt.dot(y);

    // Scale for the relative pivot tolerance
    let scale = gram.iter().fold(0.0_f64, |acc, &v| acc.max(v.abs()));
    let tol = if scale > 0.0 { PIVOT_RTOL * scale } else { PIVOT_RTOL };

    // Forward elimination with partial pivoting
    for col in 0..c {
        // Find the largest pivot in this column
        let mut pivot_row = col;
        let mut pivot_abs = gram[[col, col]].abs();
        for row in (col + 1)..c {
            let v = gram[[row, col]].abs();
            if v > pivot_abs {
                pivot_abs = v;
                pivot_row = row;
            }
        }
        if !pivot_abs.is_finite() || pivot_abs <= tol {
            return Err(AdjustError::SingularDesign { column: col });
        }

        // Swap rows in both gram and rhs
        if pivot_row != col {
            for j in 0..c {
                let tmp = gram[[col, j]];
                gram[[col, j]] = gram[[pivot_row, j]];
                gram[[pivot_row, j]] = tmp;
            }
            for j in 0..p {
                let tmp = rhs[[col, j]];
                rhs[[col, j]] = rhs[[pivot_row, j]];
                rhs[[pivot_row, j]] = tmp;
            }
        }

        // Eliminate below the pivot
        let pivot = gram[[col, col]];
        for row in (col + 1)..c {
            let factor = gram[[row, col]] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in col..c {
                gram[[row, j]] -= factor * gram[[col, j]];
            }
            for j in 0..p {
                rhs[[row, j]] -= factor * rhs[[col, j]];
            }
        }
    }

    // Back substitution
    let mut beta = Array2::zeros((c, p));
    for col in (0..c).rev() {
        for j in 0..p {
            let mut acc = rhs[[col, j]];
            for k in (col + 1)..c {
                acc -= gram[[col, k]] * beta[[k, j]];
            }
            beta[[col, j]] = acc / gram[[col, col]];
        }
    }

    Ok(beta)
}
