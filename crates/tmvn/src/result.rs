//! Fitted truncated normal results.

/// A fitted bounded-support normal posterior approximation.
///
/// Produced by [`crate::fit_tmvn`]. The fitted mean vector is the MAP
/// estimate: for a normal distribution the mode equals the mean, and the
/// fit constrains the mean to the truncation support.
#[derive(Debug, Clone)]
pub struct TmvnFit {
    mean: Vec<f64>,
    sd: Vec<f64>,
    log_likelihood: f64,
}

impl TmvnFit {
    /// Creates a new `TmvnFit` (crate-internal constructor).
    pub(crate) fn new(mean: Vec<f64>, sd: Vec<f64>, log_likelihood: f64) -> Self {
        Self {
            mean,
            sd,
            log_likelihood,
        }
    }

    /// Returns the fitted mean vector, clamped to the truncation support.
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Returns the fitted per-dimension standard deviations.
    pub fn sd(&self) -> &[f64] {
        &self.sd
    }

    /// Returns the maximised log-likelihood, summed over dimensions.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Returns the MAP estimate (the fitted mean vector).
    pub fn map(&self) -> &[f64] {
        &self.mean
    }

    /// Returns the number of parameter dimensions.
    pub fn n_params(&self) -> usize {
        self.mean.len()
    }
}
