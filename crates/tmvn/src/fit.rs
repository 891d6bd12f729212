//! Nelder-Mead maximum-likelihood fit of the truncated normal.
//!
//! Wraps the `argmin` crate to minimize the negative log-likelihood over an
//! unconstrained `(z, w)` pair per dimension, where the mean is
//! `to_bounded(z)` and the standard deviation is `exp(w)`.

use argmin::core::{CostFunction, Executor};
use argmin::solver::neldermead::NelderMead;
use tracing::debug;

use crate::density::truncated_normal_loglik;
use crate::error::TmvnError;
use crate::result::TmvnFit;
use crate::transform::{to_bounded, to_unconstrained};

/// Relative floor for the starting standard deviation.
const SD_FLOOR_FRAC: f64 = 1e-3;
/// Relative margin pulling the starting mean off the interval ends.
const MU_EDGE_FRAC: f64 = 1e-6;

/// Fits a truncated multivariate normal (diagonal covariance) to `sample`.
///
/// Each parameter dimension is fit independently by exact maximum likelihood
/// over `(mean, sd)`, truncation support `[lower[j], upper[j]]`. The
/// likelihood factorizes over dimensions for a diagonal covariance, so the
/// per-dimension optimizations jointly maximise the full likelihood.
///
/// The fitted mean vector is the MAP estimate; it is clamped to the support
/// as a final safety net against optimizer overshoot.
///
/// # Arguments
///
/// * `sample` — flat row-major sample matrix `[n_rows × n_params]`
/// * `n_params` — number of parameter columns
/// * `lower`, `upper` — truncation support per dimension `[n_params]`
///
/// # Errors
///
/// Returns [`TmvnError`] on shape or bounds violations, non-finite or
/// out-of-support data, or when the optimizer fails to produce a finite
/// maximum ([`TmvnError::OptimizationFailed`]).
pub fn fit_tmvn(
    sample: &[f64],
    n_params: usize,
    lower: &[f64],
    upper: &[f64],
) -> Result<TmvnFit, TmvnError> {
    // 1. Validate
    if n_params == 0 {
        return Err(TmvnError::ShapeMismatch {
            len: sample.len(),
            n_params,
        });
    }
    if sample.is_empty() {
        return Err(TmvnError::EmptySample);
    }
    if !sample.len().is_multiple_of(n_params) {
        return Err(TmvnError::ShapeMismatch {
            len: sample.len(),
            n_params,
        });
    }
    if lower.len() != n_params {
        return Err(TmvnError::BoundsDimensionMismatch {
            which: "lower",
            len: lower.len(),
            n_params,
        });
    }
    if upper.len() != n_params {
        return Err(TmvnError::BoundsDimensionMismatch {
            which: "upper",
            len: upper.len(),
            n_params,
        });
    }
    if sample.iter().any(|v| !v.is_finite()) {
        return Err(TmvnError::NonFiniteData);
    }
    for j in 0..n_params {
        if !(lower[j] < upper[j]) || !lower[j].is_finite() || !upper[j].is_finite() {
            return Err(TmvnError::InvalidBounds { index: j });
        }
    }

    let n_rows = sample.len() / n_params;

    // 2. Fit each dimension
    let mut mean = Vec::with_capacity(n_params);
    let mut sd = Vec::with_capacity(n_params);
    let mut log_likelihood = 0.0;
    let mut column = vec![0.0; n_rows];

    for j in 0..n_params {
        for (i, slot) in column.iter_mut().enumerate() {
            *slot = sample[i * n_params + j];
        }
        if column.iter().any(|&x| x < lower[j] || x > upper[j]) {
            return Err(TmvnError::SampleOutOfBounds { index: j });
        }

        let (mu, sigma, ll) = fit_dimension(&column, lower[j], upper[j])?;
        mean.push(mu.clamp(lower[j], upper[j]));
        sd.push(sigma);
        log_likelihood += ll;
    }

    Ok(TmvnFit::new(mean, sd, log_likelihood))
}

/// Fits one dimension's truncated normal via Nelder-Mead.
fn fit_dimension(data: &[f64], lower: f64, upper: f64) -> Result<(f64, f64, f64), TmvnError> {
    let width = upper - lower;

    // Start values: sample moments, nudged off the interval ends and floored
    let mu0 = artemis_stats::mean(data).clamp(
        lower + MU_EDGE_FRAC * width,
        upper - MU_EDGE_FRAC * width,
    );
    let sd0 = artemis_stats::sd(data).max(SD_FLOOR_FRAC * width);
    let z0 = to_unconstrained(mu0, lower, upper);
    let w0 = sd0.ln();

    // Simplex: start vertex plus unit offsets in each coordinate
    let simplex = vec![
        vec![z0, w0],
        vec![z0 + 0.5, w0],
        vec![z0, w0 + 0.5],
    ];

    let cost = TmvnCost { data, lower, upper };

    let solver = NelderMead::new(simplex)
        .with_sd_tolerance(1e-10)
        .map_err(|_| TmvnError::OptimizationFailed)?;
    let result = Executor::new(cost, solver)
        .configure(|state| state.max_iters(1000))
        .run()
        .map_err(|_| TmvnError::OptimizationFailed)?;

    let state = result.state();
    if !state.best_cost.is_finite() || state.best_cost == f64::MAX {
        return Err(TmvnError::OptimizationFailed);
    }
    let best = state
        .best_param
        .as_ref()
        .ok_or(TmvnError::OptimizationFailed)?;

    let mu = to_bounded(best[0], lower, upper);
    let sigma = best[1].exp();
    let ll = truncated_normal_loglik(data, mu, sigma, lower, upper);
    if !ll.is_finite() {
        return Err(TmvnError::OptimizationFailed);
    }

    debug!(
        iters = state.iter,
        mu,
        sigma,
        "truncated normal fit converged"
    );

    Ok((mu, sigma, ll))
}

/// Cost function for argmin: negative truncated-normal log-likelihood.
struct TmvnCost<'a> {
    data: &'a [f64],
    lower: f64,
    upper: f64,
}

impl CostFunction for TmvnCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let mu = to_bounded(params[0], self.lower, self.upper);
        let sigma = params[1].exp();
        match truncated_normal_loglik(self.data, mu, sigma, self.lower, self.upper) {
            ll if ll.is_finite() => Ok(-ll),
            _ => Ok(f64::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_empty() {
        let result = fit_tmvn(&[], 1, &[0.0], &[1.0]);
        assert!(matches!(result, Err(TmvnError::EmptySample)));
    }

    #[test]
    fn validation_shape() {
        let result = fit_tmvn(&[1.0, 2.0, 3.0], 2, &[0.0, 0.0], &[10.0, 10.0]);
        assert!(matches!(
            result,
            Err(TmvnError::ShapeMismatch { len: 3, n_params: 2 })
        ));
    }

    #[test]
    fn validation_bounds_length() {
        let result = fit_tmvn(&[1.0, 2.0], 2, &[0.0], &[10.0, 10.0]);
        assert!(matches!(
            result,
            Err(TmvnError::BoundsDimensionMismatch { which: "lower", .. })
        ));
    }

    #[test]
    fn validation_inverted_bounds() {
        let result = fit_tmvn(&[1.0, 2.0], 1, &[5.0], &[0.0]);
        assert!(matches!(result, Err(TmvnError::InvalidBounds { index: 0 })));
    }

    #[test]
    fn validation_non_finite() {
        let result = fit_tmvn(&[1.0, f64::NAN], 1, &[0.0], &[10.0]);
        assert!(matches!(result, Err(TmvnError::NonFiniteData)));
    }

    #[test]
    fn validation_out_of_support() {
        let result = fit_tmvn(&[1.0, 20.0], 1, &[0.0], &[10.0]);
        assert!(matches!(
            result,
            Err(TmvnError::SampleOutOfBounds { index: 0 })
        ));
    }

    #[test]
    fn fit_is_deterministic() {
        let data = [2.0, 3.0, 4.0, 5.0, 6.0, 5.5, 3.5, 4.5];
        let a = fit_tmvn(&data, 1, &[1.0], &[15.0]).unwrap();
        let b = fit_tmvn(&data, 1, &[1.0], &[15.0]).unwrap();
        assert_eq!(a.mean(), b.mean());
        assert_eq!(a.sd(), b.sd());
    }

    #[test]
    fn near_constant_sample_centers_on_value() {
        let data = [4.0, 4.0, 4.0, 4.0, 4.0];
        let fit = fit_tmvn(&data, 1, &[0.0], &[10.0]).unwrap();
        assert!((fit.mean()[0] - 4.0).abs() < 0.1, "mean = {}", fit.mean()[0]);
    }
}
