use clap::Parser;

/// Artemis ABC inference demonstrator.
///
/// Samples a synthetic prior population, generates summary statistics in
/// place of the external movement simulator, and runs the full rejection /
/// adjustment / MAP pipeline, printing the result as JSON.
#[derive(Parser)]
#[command(
    name = "artemis",
    version,
    about = "ABC rejection inference for individual-based movement models"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Number of prior draws to simulate.
    #[arg(short = 'n', long, default_value_t = 10_000)]
    pub draws: usize,

    /// Number of observed targets to infer.
    #[arg(short, long, default_value_t = 3)]
    pub targets: usize,

    /// Acceptance proportion for the rejection filter.
    #[arg(short, long, default_value_t = 0.001)]
    pub proportion: f64,

    /// Lower and upper credible-interval probabilities.
    #[arg(long, num_args = 2, default_values_t = [0.025, 0.975])]
    pub ci: Vec<f64>,

    /// Global RNG seed.
    #[arg(short, long, default_value_t = 42)]
    pub seed: u64,

    /// Run the MAP batch on a worker pool of this size.
    #[arg(short, long, conflicts_with = "auto_workers")]
    pub workers: Option<usize>,

    /// Size the MAP worker pool from available parallelism.
    #[arg(long, conflicts_with = "workers")]
    pub auto_workers: bool,

    /// Skip regression adjustment.
    #[arg(long)]
    pub no_adjust: bool,

    /// Skip MAP estimation.
    #[arg(long)]
    pub no_map: bool,
}
