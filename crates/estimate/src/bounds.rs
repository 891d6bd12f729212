//! Prior support bounds derived from the full parameter sample.

use crate::error::EstimateError;
use artemis_reject::RejectError;

/// Per-parameter `[min, max]` of the sampled prior, for the target columns.
///
/// Both regression-adjusted samples and MAP estimates are clamped to these
/// bounds — derived quantities never leave the sampled prior support.
#[derive(Debug, Clone)]
pub struct PriorBounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl PriorBounds {
    /// Computes bounds from the full parameter sample.
    ///
    /// `parameters` is the flat row-major `[n_draws × n_params]` prior
    /// sample; one `[min, max]` pair is produced per entry of `target_cols`,
    /// in target-column order.
    ///
    /// # Errors
    ///
    /// Returns an error if the sample is empty or misshapen, a target column
    /// is out of range, or a column has no finite spread.
    pub fn from_sample(
        parameters: &[f64],
        n_params: usize,
        target_cols: &[usize],
    ) -> Result<Self, EstimateError> {
        if n_params == 0 || parameters.is_empty() {
            return Err(EstimateError::Reject(RejectError::EmptySample));
        }
        if !parameters.len().is_multiple_of(n_params) {
            return Err(EstimateError::Reject(RejectError::ParametersShapeMismatch {
                len: parameters.len(),
                n_params,
            }));
        }
        if target_cols.is_empty() {
            return Err(EstimateError::Reject(RejectError::NoTargetColumns));
        }

        let n_draws = parameters.len() / n_params;
        let mut lower = Vec::with_capacity(target_cols.len());
        let mut upper = Vec::with_capacity(target_cols.len());
        for &col in target_cols {
            if col >= n_params {
                return Err(EstimateError::Reject(RejectError::TargetColumnOutOfRange {
                    col,
                    n_params,
                }));
            }
            let column: Vec<f64> = (0..n_draws).map(|i| parameters[i * n_params + col]).collect();
            let (min, max) = artemis_stats::finite_range(&column).ok_or(EstimateError::Reject(
                RejectError::NonFiniteInput {
                    input: "parameters",
                },
            ))?;
            lower.push(min);
            upper.push(max);
        }
        Ok(Self { lower, upper })
    }

    /// Returns the per-column lower bounds.
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Returns the per-column upper bounds.
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Returns the number of bounded columns.
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    /// Returns true if no columns are bounded.
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }
}
