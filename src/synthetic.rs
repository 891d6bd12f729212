//! Synthetic stand-in for the external movement simulator.
//!
//! The inference engine consumes trajectories only through their summary
//! statistics, so the demonstrator generates summaries directly: each draw's
//! summary vector is a noisy response surface of its parameters, mimicking
//! the step-length and habitat-use features a trajectory reduction would
//! produce.

use rand::Rng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

/// Parameter dimensions of the movement model.
pub const PARAM_NAMES: [&str; 4] = [
    "perception_range",
    "niche_optimum",
    "niche_breadth",
    "observation_error",
];

/// Sampled prior support per parameter, `[min, max]`.
pub const PRIOR_BOUNDS: [(f64, f64); 4] =
    [(1.0, 15.0), (0.0, 10.0), (0.5, 5.0), (0.0, 2.0)];

/// Number of summary statistics per trajectory.
pub const N_STATS: usize = 4;

/// Draws `n` parameter vectors uniformly from the prior support.
///
/// Returns a flat row-major `[n × 4]` matrix.
pub fn sample_prior(n: usize, rng: &mut StdRng) -> Vec<f64> {
    let mut out = Vec::with_capacity(n * PRIOR_BOUNDS.len());
    for _ in 0..n {
        for &(lo, hi) in &PRIOR_BOUNDS {
            out.push(rng.random_range(lo..hi));
        }
    }
    out
}

/// Produces the summary vector for one parameter row.
///
/// The responses stand in for mean step length, step-length spread, habitat
/// selectivity, and relocation error of a simulated trajectory.
pub fn summarize(params: &[f64], noise: &Normal<f64>, rng: &mut StdRng) -> [f64; N_STATS] {
    let (perception, optimum, breadth, error) = (params[0], params[1], params[2], params[3]);
    [
        0.6 * perception + 0.2 * breadth + noise.sample(rng),
        0.25 * perception + 0.8 * error + noise.sample(rng),
        0.5 * optimum - 0.3 * breadth + noise.sample(rng),
        0.4 * breadth + 0.5 * error + noise.sample(rng),
    ]
}

/// Generates the simulated summary matrix for a prior sample.
///
/// Returns a flat row-major `[n × N_STATS]` matrix index-aligned with
/// `parameters`.
pub fn simulate_summaries(parameters: &[f64], rng: &mut StdRng) -> Vec<f64> {
    let n_params = PRIOR_BOUNDS.len();
    let noise = observation_noise();
    let mut out = Vec::with_capacity(parameters.len() / n_params * N_STATS);
    for row in parameters.chunks_exact(n_params) {
        out.extend_from_slice(&summarize(row, &noise, rng));
    }
    out
}

/// Measurement noise added to every summary response.
pub fn observation_noise() -> Normal<f64> {
    // Constant parameters, construction cannot fail
    Normal::new(0.0, 0.15).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn prior_draws_stay_in_support() {
        let mut rng = StdRng::seed_from_u64(1);
        let draws = sample_prior(200, &mut rng);
        assert_eq!(draws.len(), 800);
        for row in draws.chunks_exact(4) {
            for (j, &v) in row.iter().enumerate() {
                let (lo, hi) = PRIOR_BOUNDS[j];
                assert!(v >= lo && v < hi, "param {j} = {v}");
            }
        }
    }

    #[test]
    fn summaries_align_with_draws() {
        let mut rng = StdRng::seed_from_u64(2);
        let draws = sample_prior(50, &mut rng);
        let summaries = simulate_summaries(&draws, &mut rng);
        assert_eq!(summaries.len(), 50 * N_STATS);
        assert!(summaries.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn summaries_respond_to_parameters() {
        let mut rng = StdRng::seed_from_u64(3);
        let noise = observation_noise();
        let low = summarize(&[2.0, 5.0, 2.0, 1.0], &noise, &mut rng);
        let high = summarize(&[14.0, 5.0, 2.0, 1.0], &noise, &mut rng);
        // Perception range drives the first summary strongly
        assert!(high[0] > low[0] + 5.0);
    }
}
