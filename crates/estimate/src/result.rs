//! Per-target and aggregate estimation results.

use std::collections::BTreeMap;

use artemis_adjust::AdjustError;
use artemis_tmvn::TmvnError;

use crate::bounds::PriorBounds;

/// One observed inference target: an identifier plus its summary vector.
#[derive(Debug, Clone)]
pub struct ObservedTarget {
    id: String,
    values: Vec<f64>,
}

impl ObservedTarget {
    /// Creates a new observed target.
    pub fn new(id: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            values,
        }
    }

    /// Returns the target identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the observed summary vector.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Regression-adjusted counterparts of a target's estimates.
#[derive(Debug, Clone)]
pub struct AdjustedEstimate {
    /// Adjusted accepted rows, flat row-major `[n_accepted × n_params]`.
    pub(crate) values: Vec<f64>,
    /// Per-column median of the adjusted rows.
    pub(crate) median: Vec<f64>,
    /// Per-column lower credible bound of the adjusted rows.
    pub(crate) ci_lower: Vec<f64>,
    /// Per-column upper credible bound of the adjusted rows.
    pub(crate) ci_upper: Vec<f64>,
    /// MAP of the adjusted sample, when requested and converged.
    pub(crate) map: Option<Vec<f64>>,
    /// MAP failure for the adjusted sample, when it did not converge.
    pub(crate) map_error: Option<TmvnError>,
}

impl AdjustedEstimate {
    /// Returns the adjusted accepted rows, flat row-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the per-column median.
    pub fn median(&self) -> &[f64] {
        &self.median
    }

    /// Returns the per-column lower credible bound.
    pub fn ci_lower(&self) -> &[f64] {
        &self.ci_lower
    }

    /// Returns the per-column upper credible bound.
    pub fn ci_upper(&self) -> &[f64] {
        &self.ci_upper
    }

    /// Returns the MAP of the adjusted sample, if available.
    pub fn map(&self) -> Option<&[f64]> {
        self.map.as_deref()
    }

    /// Returns the MAP failure for the adjusted sample, if any.
    pub fn map_error(&self) -> Option<&TmvnError> {
        self.map_error.as_ref()
    }
}

/// Posterior estimate for one inference target.
///
/// Median and credible intervals are always present; MAP and adjusted
/// fields are present when requested and successful, with failure reasons
/// preserved otherwise.
#[derive(Debug, Clone)]
pub struct TargetEstimate {
    /// The observed summary vector this target was matched against.
    pub(crate) observed: Vec<f64>,
    /// Accepted parameter rows (target columns), flat row-major.
    pub(crate) accepted: Vec<f64>,
    /// Original draw indices of the accepted rows, closest first.
    pub(crate) indices: Vec<usize>,
    /// Number of target parameter columns.
    pub(crate) n_params: usize,
    /// Per-column median of the accepted rows.
    pub(crate) median: Vec<f64>,
    /// Per-column lower credible bound.
    pub(crate) ci_lower: Vec<f64>,
    /// Per-column upper credible bound.
    pub(crate) ci_upper: Vec<f64>,
    /// MAP estimate, when requested and converged.
    pub(crate) map: Option<Vec<f64>>,
    /// MAP failure, when the fit did not converge.
    pub(crate) map_error: Option<TmvnError>,
    /// Adjusted counterparts, when adjustment was requested and succeeded.
    pub(crate) adjusted: Option<AdjustedEstimate>,
    /// Adjustment failure, when the regression could not be fit.
    pub(crate) adjust_error: Option<AdjustError>,
}

impl TargetEstimate {
    /// Returns the observed summary vector.
    pub fn observed(&self) -> &[f64] {
        &self.observed
    }

    /// Returns the accepted parameter rows, flat row-major.
    pub fn accepted(&self) -> &[f64] {
        &self.accepted
    }

    /// Returns the original draw indices of the accepted rows.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns the number of accepted rows.
    pub fn n_accepted(&self) -> usize {
        self.indices.len()
    }

    /// Returns the number of target parameter columns.
    pub fn n_params(&self) -> usize {
        self.n_params
    }

    /// Returns the per-column median of the accepted rows.
    pub fn median(&self) -> &[f64] {
        &self.median
    }

    /// Returns the per-column lower credible bound.
    pub fn ci_lower(&self) -> &[f64] {
        &self.ci_lower
    }

    /// Returns the per-column upper credible bound.
    pub fn ci_upper(&self) -> &[f64] {
        &self.ci_upper
    }

    /// Returns the MAP estimate, if available.
    pub fn map(&self) -> Option<&[f64]> {
        self.map.as_deref()
    }

    /// Returns the MAP failure, if any.
    pub fn map_error(&self) -> Option<&TmvnError> {
        self.map_error.as_ref()
    }

    /// Returns the adjusted counterparts, if available.
    pub fn adjusted(&self) -> Option<&AdjustedEstimate> {
        self.adjusted.as_ref()
    }

    /// Returns the adjustment failure, if any.
    pub fn adjust_error(&self) -> Option<&AdjustError> {
        self.adjust_error.as_ref()
    }

    /// Returns true if no per-target stage recorded a failure.
    pub fn is_complete(&self) -> bool {
        self.map_error.is_none()
            && self.adjust_error.is_none()
            && self
                .adjusted
                .as_ref()
                .is_none_or(|a| a.map_error.is_none())
    }
}

/// Aggregate result of an estimation run: one estimate per target id.
#[derive(Debug, Clone)]
pub struct EstimateSet {
    pub(crate) targets: BTreeMap<String, TargetEstimate>,
    pub(crate) target_cols: Vec<usize>,
    pub(crate) proportion: f64,
    pub(crate) ci_probs: (f64, f64),
    pub(crate) bounds: PriorBounds,
}

impl EstimateSet {
    /// Returns the estimate for one target id.
    pub fn get(&self, id: &str) -> Option<&TargetEstimate> {
        self.targets.get(id)
    }

    /// Iterates over (id, estimate) pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TargetEstimate)> {
        self.targets.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns true if the set holds no targets.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Returns the target parameter column indices.
    pub fn target_cols(&self) -> &[usize] {
        &self.target_cols
    }

    /// Returns the acceptance proportion used.
    pub fn proportion(&self) -> f64 {
        self.proportion
    }

    /// Returns the credible-interval probability levels used.
    pub fn ci_probs(&self) -> (f64, f64) {
        self.ci_probs
    }

    /// Returns the prior bounds derived from the full sample.
    pub fn bounds(&self) -> &PriorBounds {
        &self.bounds
    }
}
