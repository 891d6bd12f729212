//! Posterior estimation pipeline for ABC inference.
//!
//! Composes the Artemis crates into the full per-target workflow: rejection
//! filtering, posterior summaries (median and credible intervals), optional
//! local-linear regression adjustment, and optional MAP estimation via a
//! truncated normal fit — the latter dispatched sequentially or across a
//! scoped worker pool, since targets are independent.
//!
//! Failures local to one target (a rank-deficient regression, a
//! non-convergent MAP fit) are captured on that target's estimate; malformed
//! shared inputs abort the whole call before any work begins.
//!
//! # Pipeline
//!
//! ```text
//!  ┌────────────┐     ┌──────────────────┐     ┌──────────────┐
//!  │  Rejection  │────▶│  Adjustment      │────▶│  MAP batch   │
//!  │  (per target)│     │  (optional)      │     │  (optional,  │
//!  └────────────┘     └──────────────────┘     │   parallel)  │
//!                                               └──────┬───────┘
//!                                                      ▼
//!                                               EstimateSet
//! ```
//!
//! # Quick start
//!
//! ```
//! use artemis_estimate::{EstimateConfig, ObservedTarget, estimate_targets};
//!
//! // 6 draws, 1 parameter, 1 summary; summaries track the parameter
//! let parameters = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let summaries = vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0];
//! let targets = vec![ObservedTarget::new("site-a", vec![33.0])];
//! let config = EstimateConfig::new(0.5).with_adjust(false).with_map(false);
//!
//! let set =
//!     estimate_targets(&parameters, 1, &summaries, 1, &targets, &[0], &config, None).unwrap();
//! assert_eq!(set.get("site-a").unwrap().n_accepted(), 3);
//! ```

pub mod batch;
pub mod bounds;
pub mod config;
pub mod error;
pub mod output;
pub mod result;

pub(crate) mod summary;

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use artemis_adjust::{AdjustResult, adjust_sample};
use artemis_reject::{RejectConfig, RejectError, reject_sample};
use artemis_tmvn::{TmvnError, TmvnFit};

pub use batch::{Progress, run_map_batch};
pub use bounds::PriorBounds;
pub use config::{EstimateConfig, ExecMode};
pub use error::EstimateError;
pub use output::to_json;
pub use result::{AdjustedEstimate, EstimateSet, ObservedTarget, TargetEstimate};

/// Per-target state carried between the pipeline stages.
struct TargetWork {
    id: String,
    observed: Vec<f64>,
    accepted: Vec<f64>,
    indices: Vec<usize>,
    adjusted: Option<AdjustResult>,
    adjust_error: Option<artemis_adjust::AdjustError>,
}

/// Runs the full estimation pipeline over a set of observed targets.
///
/// For each target: filter the simulated draws by summary distance, compute
/// per-column medians and credible intervals of the accepted rows, optionally
/// fit and apply the regression adjustment, and optionally fit the MAP
/// estimate on the raw and adjusted samples. MAP fits for all targets form
/// one batch executed according to `config.exec()`; the output order is tied
/// to target identity, never to worker completion order.
///
/// # Arguments
///
/// * `parameters` — flat row-major prior sample `[n_draws × n_params]`
/// * `n_params` — number of parameter columns
/// * `summaries` — flat row-major simulated summaries `[n_draws × n_stats]`,
///   index-aligned with `parameters`
/// * `n_stats` — number of summary columns
/// * `targets` — observed summary targets, each with a unique id
/// * `target_cols` — parameter columns under inference
/// * `config` — proportion, credible levels, stage toggles, execution mode
/// * `progress` — invoked after each MAP batch item completes
///
/// # Errors
///
/// Returns [`EstimateError`] for malformed shared configuration or inputs
/// (bad probabilities, zero worker count, duplicate ids, shape and dimension
/// mismatches, degenerate scales). Per-target adjustment and MAP failures are
/// captured on the corresponding [`TargetEstimate`] instead.
#[allow(clippy::too_many_arguments)]
pub fn estimate_targets(
    parameters: &[f64],
    n_params: usize,
    summaries: &[f64],
    n_stats: usize,
    targets: &[ObservedTarget],
    target_cols: &[usize],
    config: &EstimateConfig,
    progress: Option<&Progress>,
) -> Result<EstimateSet, EstimateError> {
    // Step 1: Global validation before any work
    config.validate()?;
    if targets.is_empty() {
        return Err(EstimateError::NoTargets);
    }
    let mut seen = BTreeSet::new();
    for target in targets {
        if !seen.insert(target.id()) {
            return Err(EstimateError::DuplicateTargetId {
                id: target.id().to_string(),
            });
        }
        if target.values().len() != n_stats {
            return Err(EstimateError::Reject(RejectError::ObservedDimensionMismatch {
                observed: target.values().len(),
                n_stats,
            }));
        }
    }

    let reject_config =
        RejectConfig::new(config.proportion()).with_scale(config.scale().clone());
    let bounds = PriorBounds::from_sample(parameters, n_params, target_cols)?;
    let n_cols = target_cols.len();

    info!(
        n_draws = parameters.len() / n_params.max(1),
        n_targets = targets.len(),
        n_cols,
        proportion = config.proportion(),
        "estimating posterior targets"
    );

    // Step 2: Rejection and (optional) adjustment, per target
    let mut work = Vec::with_capacity(targets.len());
    for target in targets {
        let rejected = reject_sample(
            parameters,
            n_params,
            summaries,
            n_stats,
            target.values(),
            target_cols,
            &reject_config,
        )?;

        let (adjusted, adjust_error) = if config.adjust() {
            // Pull the accepted summary rows for the regression stage
            let mut accepted_summaries = Vec::with_capacity(rejected.n_accepted() * n_stats);
            for &idx in rejected.indices() {
                accepted_summaries
                    .extend_from_slice(&summaries[idx * n_stats..(idx + 1) * n_stats]);
            }
            match adjust_sample(
                rejected.values(),
                n_cols,
                &accepted_summaries,
                n_stats,
                target.values(),
                bounds.lower(),
                bounds.upper(),
            ) {
                Ok(result) => (Some(result), None),
                Err(e) => {
                    debug!(target_id = target.id(), error = %e, "adjustment failed");
                    (None, Some(e))
                }
            }
        } else {
            (None, None)
        };

        work.push(TargetWork {
            id: target.id().to_string(),
            observed: target.values().to_vec(),
            accepted: rejected.values().to_vec(),
            indices: rejected.indices().to_vec(),
            adjusted,
            adjust_error,
        });
    }

    // Step 3: One MAP batch covering raw samples then adjusted samples
    type MapSlot = Option<Result<TmvnFit, TmvnError>>;
    let mut raw_fits: Vec<MapSlot> = vec![None; work.len()];
    let mut adjusted_fits: Vec<MapSlot> = vec![None; work.len()];
    if config.map() {
        let mut items: Vec<&[f64]> = work.iter().map(|w| w.accepted.as_slice()).collect();
        let n_raw = items.len();
        let adjusted_targets: Vec<usize> = work
            .iter()
            .enumerate()
            .filter(|(_, w)| w.adjusted.is_some())
            .map(|(i, _)| i)
            .collect();
        for &i in &adjusted_targets {
            if let Some(adj) = &work[i].adjusted {
                items.push(adj.values());
            }
        }

        let fits = run_map_batch(
            &items,
            n_cols,
            bounds.lower(),
            bounds.upper(),
            config.exec(),
            progress,
        )?;

        let mut fits = fits.into_iter();
        for slot in raw_fits.iter_mut().take(n_raw) {
            *slot = fits.next();
        }
        for (&target_idx, fit) in adjusted_targets.iter().zip(fits) {
            adjusted_fits[target_idx] = Some(fit);
        }
    }

    // Step 4: Assemble per-target estimates keyed by id
    let mut results = BTreeMap::new();
    for ((w, raw_fit), adj_fit) in work.into_iter().zip(raw_fits).zip(adjusted_fits) {
        let stats = summary::summarize_columns(&w.accepted, n_cols, config.ci_probs());

        let (map, map_error) = match raw_fit {
            Some(Ok(fit)) => (Some(fit.map().to_vec()), None),
            Some(Err(e)) => (None, Some(e)),
            None => (None, None),
        };

        let adjusted = w.adjusted.map(|adj| {
            let adj_stats =
                summary::summarize_columns(adj.values(), n_cols, config.ci_probs());
            let (adj_map, adj_map_error) = match adj_fit {
                Some(Ok(fit)) => (Some(fit.map().to_vec()), None),
                Some(Err(e)) => (None, Some(e)),
                None => (None, None),
            };
            AdjustedEstimate {
                values: adj.values().to_vec(),
                median: adj_stats.median,
                ci_lower: adj_stats.ci_lower,
                ci_upper: adj_stats.ci_upper,
                map: adj_map,
                map_error: adj_map_error,
            }
        });

        results.insert(
            w.id,
            TargetEstimate {
                observed: w.observed,
                accepted: w.accepted,
                indices: w.indices,
                n_params: n_cols,
                median: stats.median,
                ci_lower: stats.ci_lower,
                ci_upper: stats.ci_upper,
                map,
                map_error,
                adjusted,
                adjust_error: w.adjust_error,
            },
        );
    }

    Ok(EstimateSet {
        targets: results,
        target_cols: target_cols.to_vec(),
        proportion: config.proportion(),
        ci_probs: config.ci_probs(),
        bounds,
    })
}
