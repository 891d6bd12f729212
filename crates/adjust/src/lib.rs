//! Local-linear regression adjustment of accepted ABC samples.
//!
//! Acceptance with a nonzero tolerance retains draws whose summaries are near
//! but not equal to the observed target. This crate fits a local-linear model
//! of parameter deviation on summary deviation within the accepted
//! neighborhood and subtracts the predicted deviation from each accepted
//! draw, clamping the corrected values to the prior support.
//!
//! # Quick start
//!
//! ```
//! use artemis_adjust::adjust_sample;
//!
//! // 4 accepted draws, 1 parameter, 1 summary statistic; param tracks summary
//! let params = vec![1.0, 2.0, 3.0, 4.0];
//! let summaries = vec![1.1, 2.1, 3.1, 4.1];
//! let observed = [2.6];
//! let result = adjust_sample(&params, 1, &summaries, 1, &observed, &[0.0], &[10.0]).unwrap();
//! // The linear trend is removed: all rows collapse onto the observed point
//! for i in 0..4 {
//!     assert!((result.row(i)[0] - 2.5).abs() < 1e-9);
//! }
//! ```

pub mod error;
pub mod result;

pub(crate) mod ols;

use ndarray::Array2;
use tracing::debug;

pub use error::AdjustError;
pub use result::AdjustResult;

/// Validates all inputs and returns the number of accepted rows.
fn validate_inputs(
    params: &[f64],
    n_params: usize,
    summaries: &[f64],
    n_stats: usize,
    observed: &[f64],
    lower: &[f64],
    upper: &[f64],
) -> Result<usize, AdjustError> {
    if n_params == 0 {
        return Err(AdjustError::ParametersShapeMismatch {
            len: params.len(),
            n_params,
        });
    }
    if n_stats == 0 {
        return Err(AdjustError::SummariesShapeMismatch {
            len: summaries.len(),
            n_stats,
        });
    }
    if params.is_empty() || summaries.is_empty() {
        return Err(AdjustError::EmptySample);
    }
    if !params.len().is_multiple_of(n_params) {
        return Err(AdjustError::ParametersShapeMismatch {
            len: params.len(),
            n_params,
        });
    }
    if !summaries.len().is_multiple_of(n_stats) {
        return Err(AdjustError::SummariesShapeMismatch {
            len: summaries.len(),
            n_stats,
        });
    }

    let rows = params.len() / n_params;
    let summary_rows = summaries.len() / n_stats;
    if rows != summary_rows {
        return Err(AdjustError::RowCountMismatch {
            params: rows,
            summaries: summary_rows,
        });
    }
    if observed.len() != n_stats {
        return Err(AdjustError::ObservedDimensionMismatch {
            observed: observed.len(),
            n_stats,
        });
    }
    if lower.len() != n_params {
        return Err(AdjustError::BoundsDimensionMismatch {
            which: "lower",
            len: lower.len(),
            n_params,
        });
    }
    if upper.len() != n_params {
        return Err(AdjustError::BoundsDimensionMismatch {
            which: "upper",
            len: upper.len(),
            n_params,
        });
    }
    for i in 0..n_params {
        if !(lower[i] < upper[i]) {
            return Err(AdjustError::InvalidBounds { index: i });
        }
    }

    // The regression needs more rows than coefficients (intercept + slopes)
    let need = n_stats + 2;
    if rows < need {
        return Err(AdjustError::InsufficientRows { rows, need });
    }

    // NaN guards — the accepted subset is small, so check everything
    if params.iter().any(|v| !v.is_finite()) {
        return Err(AdjustError::NonFiniteInput { input: "params" });
    }
    if summaries.iter().any(|v| !v.is_finite()) {
        return Err(AdjustError::NonFiniteInput { input: "summaries" });
    }
    if observed.iter().any(|v| !v.is_finite()) {
        return Err(AdjustError::NonFiniteInput { input: "observed" });
    }
    if lower.iter().chain(upper.iter()).any(|v| !v.is_finite()) {
        return Err(AdjustError::NonFiniteInput { input: "bounds" });
    }

    Ok(rows)
}

/// Applies local-linear regression adjustment to an accepted sample.
///
/// Centers the accepted summaries on the observed vector, fits one ordinary
/// least-squares regression of the accepted parameters on the centered
/// summaries (with an intercept that is then discarded, since the correction
/// is evaluated at the observed point), and subtracts the predicted deviation
/// from each accepted draw:
///
/// ```text
/// adjusted[i][p] = params[i][p] − Σⱼ coef[j][p] × (summaries[i][j] − observed[j])
/// ```
///
/// Every adjusted value is clamped to `[lower[p], upper[p]]` so the corrected
/// sample never leaves the prior support.
///
/// # Arguments
///
/// * `params` — accepted parameter rows, flat row-major `[rows × n_params]`
/// * `n_params` — number of parameter columns
/// * `summaries` — accepted summary rows, flat row-major `[rows × n_stats]`,
///   row-aligned with `params`
/// * `n_stats` — number of summary columns
/// * `observed` — target summary vector `[n_stats]`
/// * `lower`, `upper` — prior support per parameter column `[n_params]`
///
/// # Errors
///
/// Returns [`AdjustError`] on shape or dimension mismatches, non-finite
/// inputs, too few rows, or a rank-deficient design
/// ([`AdjustError::SingularDesign`] — never a silent NaN coefficient).
pub fn adjust_sample(
    params: &[f64],
    n_params: usize,
    summaries: &[f64],
    n_stats: usize,
    observed: &[f64],
    lower: &[f64],
    upper: &[f64],
) -> Result<AdjustResult, AdjustError> {
    let rows = validate_inputs(params, n_params, summaries, n_stats, observed, lower, upper)?;

    // Step 1: Build the design matrix [1 | centered summaries] and response
    let mut design = Array2::zeros((rows, n_stats + 1));
    for i in 0..rows {
        design[[i, 0]] = 1.0;
        for j in 0..n_stats {
            design[[i, j + 1]] = summaries[i * n_stats + j] - observed[j];
        }
    }
    let response =
        Array2::from_shape_vec((rows, n_params), params.to_vec()).map_err(|_| {
            AdjustError::ParametersShapeMismatch {
                len: params.len(),
                n_params,
            }
        })?;

    // Step 2: Least-squares fit; discard the intercept row
    let beta = ols::solve_least_squares(&design, &response)?;
    let mut coefficients = vec![0.0; n_stats * n_params];
    for j in 0..n_stats {
        for p in 0..n_params {
            coefficients[j * n_params + p] = beta[[j + 1, p]];
        }
    }

    debug!(rows, n_params, n_stats, "regression adjustment fitted");

    // Step 3: Subtract the predicted deviation and clamp to the prior support
    let mut values = vec![0.0; rows * n_params];
    for i in 0..rows {
        for p in 0..n_params {
            let mut correction = 0.0;
            for j in 0..n_stats {
                correction += coefficients[j * n_params + p] * design[[i, j + 1]];
            }
            let adjusted = params[i * n_params + p] - correction;
            values[i * n_params + p] = adjusted.clamp(lower[p], upper[p]);
        }
    }

    Ok(AdjustResult::new(values, coefficients, n_params, n_stats))
}
