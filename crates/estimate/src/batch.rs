//! MAP estimation batches over independent targets.

use rayon::prelude::*;
use tracing::{debug, warn};

use artemis_tmvn::{TmvnError, TmvnFit, fit_tmvn};

use crate::config::{ExecMode, resolve_workers};
use crate::error::EstimateError;

/// Progress callback invoked after a batch item completes, with the item's
/// index and the batch size. In parallel mode the invocation order follows
/// completion order; result order always follows input order.
pub type Progress = dyn Fn(usize, usize) + Sync;

/// Runs MAP estimation over a batch of independent samples.
///
/// All samples share the parameter dimension and the truncation support.
/// Each item's fit failure is captured in its own slot rather than aborting
/// the batch; the output order matches the input order regardless of worker
/// completion order. In parallel mode the worker pool is built immediately
/// before dispatch and torn down when this function returns.
///
/// # Errors
///
/// Returns [`EstimateError::InvalidWorkerCount`] for an explicit worker
/// count of zero, and [`EstimateError::WorkerPool`] when the pool cannot be
/// constructed. Per-item [`TmvnError`]s are returned inside the vector.
pub fn run_map_batch(
    samples: &[&[f64]],
    n_params: usize,
    lower: &[f64],
    upper: &[f64],
    exec: &ExecMode,
    progress: Option<&Progress>,
) -> Result<Vec<Result<TmvnFit, TmvnError>>, EstimateError> {
    let workers = resolve_workers(exec)?;
    let total = samples.len();

    let fit_one = |idx: usize, sample: &[f64]| {
        let fit = fit_tmvn(sample, n_params, lower, upper);
        match &fit {
            Ok(f) => debug!(target_idx = idx, map = ?f.map(), "MAP fit complete"),
            Err(e) => warn!(target_idx = idx, error = %e, "MAP fit failed"),
        }
        if let Some(cb) = progress {
            cb(idx, total);
        }
        fit
    };

    match workers {
        None => Ok(samples
            .iter()
            .enumerate()
            .map(|(idx, sample)| fit_one(idx, sample))
            .collect()),
        Some(n_workers) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n_workers)
                .build()
                .map_err(|e| EstimateError::WorkerPool {
                    reason: e.to_string(),
                })?;
            debug!(n_workers, total, "dispatching MAP batch to worker pool");
            // Collected by input index, not completion order
            let results = pool.install(|| {
                samples
                    .par_iter()
                    .enumerate()
                    .map(|(idx, sample)| fit_one(idx, sample))
                    .collect()
            });
            Ok(results)
        }
    }
}
