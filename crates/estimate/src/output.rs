//! JSON output structures for estimation results.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::EstimateError;
use crate::result::EstimateSet;

/// Top-level estimation output.
#[derive(Debug, Serialize)]
pub struct EstimateOutput {
    /// Configuration summary.
    pub config: ConfigSummary,
    /// Per-target estimates keyed by target id.
    pub targets: BTreeMap<String, TargetOutput>,
}

/// Summary of the configuration used.
#[derive(Debug, Serialize)]
pub struct ConfigSummary {
    pub proportion: f64,
    pub ci_probs: (f64, f64),
    pub target_cols: Vec<usize>,
    pub prior_lower: Vec<f64>,
    pub prior_upper: Vec<f64>,
    pub n_targets: usize,
}

/// Estimate for a single target.
#[derive(Debug, Clone, Serialize)]
pub struct TargetOutput {
    pub observed: Vec<f64>,
    pub n_accepted: usize,
    pub median: Vec<f64>,
    pub ci_lower: Vec<f64>,
    pub ci_upper: Vec<f64>,
    pub map: Option<Vec<f64>>,
    pub map_error: Option<String>,
    pub adjusted: Option<AdjustedOutput>,
    pub adjust_error: Option<String>,
}

/// Regression-adjusted estimate block.
#[derive(Debug, Clone, Serialize)]
pub struct AdjustedOutput {
    pub median: Vec<f64>,
    pub ci_lower: Vec<f64>,
    pub ci_upper: Vec<f64>,
    pub map: Option<Vec<f64>>,
    pub map_error: Option<String>,
}

/// Serializes an [`EstimateSet`] to pretty-printed JSON.
///
/// Per-target failure reasons are rendered through their `Display`
/// implementations, so the output always reflects which targets succeeded
/// and which failed.
///
/// # Errors
///
/// Returns [`EstimateError::Serialization`] if JSON serialization fails.
pub fn to_json(set: &EstimateSet) -> Result<String, EstimateError> {
    let targets = set
        .iter()
        .map(|(id, est)| {
            let adjusted = est.adjusted().map(|a| AdjustedOutput {
                median: a.median().to_vec(),
                ci_lower: a.ci_lower().to_vec(),
                ci_upper: a.ci_upper().to_vec(),
                map: a.map().map(<[f64]>::to_vec),
                map_error: a.map_error().map(|e| e.to_string()),
            });
            let out = TargetOutput {
                observed: est.observed().to_vec(),
                n_accepted: est.n_accepted(),
                median: est.median().to_vec(),
                ci_lower: est.ci_lower().to_vec(),
                ci_upper: est.ci_upper().to_vec(),
                map: est.map().map(<[f64]>::to_vec),
                map_error: est.map_error().map(|e| e.to_string()),
                adjusted,
                adjust_error: est.adjust_error().map(|e| e.to_string()),
            };
            (id.to_string(), out)
        })
        .collect();

    let output = EstimateOutput {
        config: ConfigSummary {
            proportion: set.proportion(),
            ci_probs: set.ci_probs(),
            target_cols: set.target_cols().to_vec(),
            prior_lower: set.bounds().lower().to_vec(),
            prior_upper: set.bounds().upper().to_vec(),
            n_targets: set.len(),
        },
        targets,
    };

    serde_json::to_string_pretty(&output).map_err(|e| EstimateError::Serialization {
        reason: e.to_string(),
    })
}
