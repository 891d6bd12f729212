use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use artemis_estimate::{
    EstimateConfig, ExecMode, ObservedTarget, estimate_targets, to_json,
};

use crate::cli::Cli;
use crate::synthetic;

/// Run the full demonstration pipeline.
pub fn run(cli: &Cli) -> Result<()> {
    // Step 1: Resolve the execution mode once, up front
    let exec = if let Some(workers) = cli.workers {
        ExecMode::Parallel { workers }
    } else if cli.auto_workers {
        ExecMode::ParallelAuto
    } else {
        ExecMode::Sequential
    };

    let config = EstimateConfig::new(cli.proportion)
        .with_ci_probs(cli.ci[0], cli.ci[1])
        .with_adjust(!cli.no_adjust)
        .with_map(!cli.no_map)
        .with_exec(exec);

    // Step 2: Sample the prior and simulate summaries
    let mut rng = StdRng::seed_from_u64(cli.seed);
    info!(
        draws = cli.draws,
        seed = cli.seed,
        params = ?synthetic::PARAM_NAMES,
        "sampling prior population"
    );
    let parameters = synthetic::sample_prior(cli.draws, &mut rng);
    let summaries = synthetic::simulate_summaries(&parameters, &mut rng);

    // Step 3: Generate observed targets from hidden "true" parameters
    let truths = synthetic::sample_prior(cli.targets, &mut rng);
    let noise = synthetic::observation_noise();
    let targets: Vec<ObservedTarget> = truths
        .chunks_exact(synthetic::PRIOR_BOUNDS.len())
        .enumerate()
        .map(|(i, row)| {
            let observed = synthetic::summarize(row, &noise, &mut rng);
            info!(
                target = i,
                truth = ?row,
                "generated observed target"
            );
            ObservedTarget::new(format!("target-{i:02}"), observed.to_vec())
        })
        .collect();

    // Step 4: Run the inference pipeline
    let n_params = synthetic::PRIOR_BOUNDS.len();
    let target_cols: Vec<usize> = (0..n_params).collect();
    let progress = |idx: usize, total: usize| {
        info!(item = idx + 1, total, "MAP batch item complete");
    };
    let set = estimate_targets(
        &parameters,
        n_params,
        &summaries,
        synthetic::N_STATS,
        &targets,
        &target_cols,
        &config,
        Some(&progress),
    )
    .context("estimation failed")?;

    for (id, est) in set.iter() {
        info!(
            target = id,
            n_accepted = est.n_accepted(),
            complete = est.is_complete(),
            median = ?est.median(),
            "target estimated"
        );
    }

    // Step 5: Emit JSON to stdout
    let json = to_json(&set).context("failed to serialize estimates")?;
    println!("{json}");

    Ok(())
}
