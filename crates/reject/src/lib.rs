//! ABC rejection filtering.
//!
//! This crate reduces a population of simulated summary vectors to the
//! accepted posterior subset: each simulated draw is scored by its
//! standardized Euclidean distance to an observed summary vector, and the
//! closest `ceil(N × proportion)` draws are retained.
//!
//! # Quick start
//!
//! ```
//! use artemis_reject::{RejectConfig, reject_sample};
//!
//! // 5 draws, 1 parameter, 1 summary statistic
//! let parameters = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! let summaries = vec![10.0, 20.0, 30.0, 40.0, 50.0];
//! let observed = [32.0];
//! let config = RejectConfig::new(0.4);
//!
//! let result = reject_sample(&parameters, 1, &summaries, 1, &observed, &[0], &config).unwrap();
//! assert_eq!(result.indices(), &[2, 3]);
//! ```
//!
//! # Architecture
//!
//! ```text
//! reject_sample()
//!   ├─ validate inputs
//!   ├─ summary_ranges()            (scale.rs)
//!   ├─ standardized_distances()    (distance.rs)
//!   └─ select_closest()            (filter.rs)
//! ```

pub mod config;
pub mod error;
pub mod result;

pub(crate) mod distance;
pub(crate) mod filter;
pub(crate) mod scale;

use tracing::debug;

pub use config::{RejectConfig, ScaleMode};
pub use error::RejectError;
pub use result::RejectResult;

/// Validates all inputs and returns the derived number of draws.
fn validate_inputs(
    parameters: &[f64],
    n_params: usize,
    summaries: &[f64],
    n_stats: usize,
    observed: &[f64],
    target_cols: &[usize],
    config: &RejectConfig,
) -> Result<usize, RejectError> {
    // Config validation first
    config.validate()?;

    // Column counts must be >= 1 to avoid division by zero
    if n_params == 0 {
        return Err(RejectError::ParametersShapeMismatch {
            len: parameters.len(),
            n_params,
        });
    }
    if n_stats == 0 {
        return Err(RejectError::SummariesShapeMismatch {
            len: summaries.len(),
            n_stats,
        });
    }

    // Shape checks
    if parameters.is_empty() || summaries.is_empty() {
        return Err(RejectError::EmptySample);
    }
    if !parameters.len().is_multiple_of(n_params) {
        return Err(RejectError::ParametersShapeMismatch {
            len: parameters.len(),
            n_params,
        });
    }
    if !summaries.len().is_multiple_of(n_stats) {
        return Err(RejectError::SummariesShapeMismatch {
            len: summaries.len(),
            n_stats,
        });
    }

    let n_draws = parameters.len() / n_params;
    let n_summaries = summaries.len() / n_stats;
    if n_draws != n_summaries {
        return Err(RejectError::DrawCountMismatch {
            n_draws,
            n_summaries,
        });
    }

    // Dimension checks
    if observed.len() != n_stats {
        return Err(RejectError::ObservedDimensionMismatch {
            observed: observed.len(),
            n_stats,
        });
    }

    // NaN guard on the observed target (cheap — small array)
    if observed.iter().any(|v| !v.is_finite()) {
        return Err(RejectError::NonFiniteInput { input: "observed" });
    }

    // Target column checks
    if target_cols.is_empty() {
        return Err(RejectError::NoTargetColumns);
    }
    for &col in target_cols {
        if col >= n_params {
            return Err(RejectError::TargetColumnOutOfRange { col, n_params });
        }
    }

    Ok(n_draws)
}

/// Performs ABC rejection filtering.
///
/// Scores each simulated draw by the standardized Euclidean distance between
/// its summary vector and `observed`, then retains the closest
/// `ceil(n_draws × proportion)` draws. Draws whose summaries contain
/// non-finite values receive infinite distance and are never preferred over
/// finite draws. Ties are broken by original draw order, so the selection is
/// deterministic.
///
/// # Arguments
///
/// * `parameters` — flat row-major parameter matrix `[n_draws × n_params]`
/// * `n_params` — number of parameter columns per draw
/// * `summaries` — flat row-major summary matrix `[n_draws × n_stats]`,
///   index-aligned with `parameters`
/// * `n_stats` — number of summary columns per draw
/// * `observed` — target summary vector `[n_stats]`
/// * `target_cols` — parameter columns under inference; the returned rows are
///   restricted to these columns
/// * `config` — acceptance proportion and scale mode
///
/// # Errors
///
/// Returns [`RejectError`] if inputs are invalid (empty sample, shape or
/// dimension mismatches, non-finite observed target, invalid proportion,
/// degenerate standardization scale, bad target columns).
pub fn reject_sample(
    parameters: &[f64],
    n_params: usize,
    summaries: &[f64],
    n_stats: usize,
    observed: &[f64],
    target_cols: &[usize],
    config: &RejectConfig,
) -> Result<RejectResult, RejectError> {
    let n_draws = validate_inputs(
        parameters,
        n_params,
        summaries,
        n_stats,
        observed,
        target_cols,
        config,
    )?;

    // Step 1: Resolve the standardization scale
    let owned_ranges;
    let scale: &[f64] = match config.scale() {
        ScaleMode::SummaryRange => {
            owned_ranges = scale::summary_ranges(summaries, n_stats, n_draws)?;
            &owned_ranges
        }
        ScaleMode::Fixed(s) => {
            scale::validate_fixed_scale(s, n_stats)?;
            s
        }
    };

    // Step 2: Compute distances
    let mut distances = vec![0.0; n_draws];
    distance::standardized_distances(summaries, n_stats, observed, scale, &mut distances);

    // Step 3: Retain the closest k draws
    let k = filter::retain_count(n_draws, config.proportion());
    let pairs = filter::select_closest(&distances, k);

    debug!(
        n_draws,
        k,
        max_retained = pairs.last().map(|&(d, _)| d).unwrap_or(0.0),
        "rejection filter applied"
    );

    // Step 4: Extract accepted rows restricted to the target columns
    let n_cols = target_cols.len();
    let mut values = Vec::with_capacity(k * n_cols);
    let mut indices = Vec::with_capacity(k);
    let mut retained = Vec::with_capacity(k);
    for &(d, idx) in &pairs {
        indices.push(idx);
        retained.push(d);
        let row = &parameters[idx * n_params..(idx + 1) * n_params];
        for &col in target_cols {
            values.push(row[col]);
        }
    }

    Ok(RejectResult::new(indices, retained, values, n_cols))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_draws_retained() {
        // Observed matches draw 2 exactly
        let parameters = [1.0, 2.0, 3.0, 4.0, 5.0];
        let summaries = [10.0, 20.0, 30.0, 40.0, 50.0];
        let config = RejectConfig::new(0.2);
        let result =
            reject_sample(&parameters, 1, &summaries, 1, &[30.0], &[0], &config).unwrap();
        assert_eq!(result.indices(), &[2]);
        assert_eq!(result.values(), &[3.0]);
        assert_eq!(result.distances()[0], 0.0);
    }

    #[test]
    fn test_target_column_restriction() {
        // 3 draws × 2 params; only column 1 under inference
        let parameters = [1.0, 10.0, 2.0, 20.0, 3.0, 30.0];
        let summaries = [5.0, 6.0, 7.0];
        let config = RejectConfig::new(0.6);
        let result =
            reject_sample(&parameters, 2, &summaries, 1, &[5.0], &[1], &config).unwrap();
        assert_eq!(result.n_cols(), 1);
        assert_eq!(result.indices(), &[0, 1]);
        assert_eq!(result.values(), &[10.0, 20.0]);
    }

    #[test]
    fn test_distances_ascending() {
        let parameters = [1.0, 2.0, 3.0, 4.0];
        let summaries = [4.0, 1.0, 3.0, 2.0];
        let config = RejectConfig::new(1.0);
        let result =
            reject_sample(&parameters, 1, &summaries, 1, &[1.0], &[0], &config).unwrap();
        let d = result.distances();
        assert!(d.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(result.indices()[0], 1);
    }

    #[test]
    fn test_nan_summary_never_accepted() {
        let parameters = [1.0, 2.0, 3.0];
        let summaries = [f64::NAN, 5.0, 6.0];
        let config = RejectConfig::new(0.34);
        let result =
            reject_sample(&parameters, 1, &summaries, 1, &[5.0], &[0], &config).unwrap();
        assert!(!result.indices().contains(&0));
    }

    #[test]
    fn test_error_empty() {
        let config = RejectConfig::new(0.1);
        let result = reject_sample(&[], 1, &[], 1, &[0.0], &[0], &config);
        assert!(matches!(result, Err(RejectError::EmptySample)));
    }

    #[test]
    fn test_error_draw_count_mismatch() {
        let config = RejectConfig::new(0.1);
        let result = reject_sample(&[1.0, 2.0], 1, &[1.0, 2.0, 3.0], 1, &[0.0], &[0], &config);
        assert!(matches!(
            result,
            Err(RejectError::DrawCountMismatch {
                n_draws: 2,
                n_summaries: 3
            })
        ));
    }

    #[test]
    fn test_error_degenerate_scale() {
        // Constant summary column -> zero range
        let parameters = [1.0, 2.0, 3.0];
        let summaries = [5.0, 5.0, 5.0];
        let config = RejectConfig::new(0.5);
        let result = reject_sample(&parameters, 1, &summaries, 1, &[5.0], &[0], &config);
        assert!(matches!(
            result,
            Err(RejectError::DegenerateScale { index: 0 })
        ));
    }

    #[test]
    fn test_fixed_scale_overrides_range() {
        // Constant summary column is fine under a fixed scale
        let parameters = [1.0, 2.0, 3.0];
        let summaries = [5.0, 5.0, 5.0];
        let config = RejectConfig::new(0.5).with_scale(ScaleMode::Fixed(vec![2.0]));
        let result =
            reject_sample(&parameters, 1, &summaries, 1, &[5.0], &[0], &config).unwrap();
        assert_eq!(result.n_accepted(), 2);
        // Ties resolve in draw order
        assert_eq!(result.indices(), &[0, 1]);
    }
}
