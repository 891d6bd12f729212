//! Log-likelihood of a normal distribution truncated to an interval.

use statrs::distribution::{ContinuousCDF, Normal};

const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_8;

/// Smallest truncation mass treated as non-degenerate.
const MIN_MASS: f64 = 1e-300;

/// Log-likelihood of `data` under a normal `N(mu, sigma²)` truncated to
/// `[lower, upper]`.
///
/// ```text
/// ℓ = Σᵢ ln φ((xᵢ − mu)/sigma) − n·ln sigma − n·ln(Φ(β) − Φ(α))
/// ```
///
/// with `α = (lower − mu)/sigma`, `β = (upper − mu)/sigma`. Returns
/// `f64::NEG_INFINITY` when `sigma` is non-positive or non-finite, when the
/// truncation mass vanishes numerically, or when a data point lies outside
/// the support — the optimizer treats all of these as infinitely bad.
pub(crate) fn truncated_normal_loglik(
    data: &[f64],
    mu: f64,
    sigma: f64,
    lower: f64,
    upper: f64,
) -> f64 {
    if !mu.is_finite() || !sigma.is_finite() || sigma <= 0.0 {
        return f64::NEG_INFINITY;
    }
    let Ok(std_norm) = Normal::new(0.0, 1.0) else {
        return f64::NEG_INFINITY;
    };

    let alpha = (lower - mu) / sigma;
    let beta = (upper - mu) / sigma;
    let mass = std_norm.cdf(beta) - std_norm.cdf(alpha);
    if !(mass > MIN_MASS) {
        return f64::NEG_INFINITY;
    }

    let n = data.len() as f64;
    let mut acc = 0.0;
    for &x in data {
        if x < lower || x > upper {
            return f64::NEG_INFINITY;
        }
        let z = (x - mu) / sigma;
        acc += -0.5 * z * z;
    }
    acc - n * (sigma.ln() + LN_SQRT_2PI + mass.ln())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn wide_bounds_match_untruncated_normal() {
        // With bounds far in the tails the truncation mass is ~1 and the
        // log-likelihood reduces to the plain normal one.
        let data = [0.5, -0.2, 1.0];
        let (mu, sigma) = (0.1, 1.2);
        let ll = truncated_normal_loglik(&data, mu, sigma, -100.0, 100.0);

        let plain: f64 = data
            .iter()
            .map(|&x| {
                let z = (x - mu) / sigma;
                -0.5 * z * z - sigma.ln() - LN_SQRT_2PI
            })
            .sum();
        assert_abs_diff_eq!(ll, plain, epsilon = 1e-10);
    }

    #[test]
    fn truncation_raises_density() {
        // Halving the support roughly doubles the density of interior points
        let data = [0.0];
        let full = truncated_normal_loglik(&data, 0.0, 1.0, -100.0, 100.0);
        let half = truncated_normal_loglik(&data, 0.0, 1.0, 0.0, 100.0);
        assert_abs_diff_eq!(half - full, 2.0_f64.ln(), epsilon = 1e-9);
    }

    #[test]
    fn symmetric_interval_symmetric_mu() {
        let data = [0.3];
        let a = truncated_normal_loglik(&data, 0.5, 1.0, -2.0, 2.0);
        let b = truncated_normal_loglik(&[-0.3], -0.5, 1.0, -2.0, 2.0);
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
    }

    #[test]
    fn invalid_sigma_is_neg_infinity() {
        assert_eq!(
            truncated_normal_loglik(&[0.0], 0.0, 0.0, -1.0, 1.0),
            f64::NEG_INFINITY
        );
        assert_eq!(
            truncated_normal_loglik(&[0.0], 0.0, -1.0, -1.0, 1.0),
            f64::NEG_INFINITY
        );
        assert_eq!(
            truncated_normal_loglik(&[0.0], 0.0, f64::NAN, -1.0, 1.0),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn data_outside_support_is_neg_infinity() {
        assert_eq!(
            truncated_normal_loglik(&[5.0], 0.0, 1.0, -1.0, 1.0),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn vanishing_mass_is_neg_infinity() {
        // Support 40+ sigmas away from the mean has no numerical mass
        assert_eq!(
            truncated_normal_loglik(&[100.0], 0.0, 1.0, 100.0, 101.0),
            f64::NEG_INFINITY
        );
    }
}
