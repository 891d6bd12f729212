//! Configuration for the estimation pipeline.

use artemis_reject::ScaleMode;

use crate::error::EstimateError;

/// Execution mode for the MAP estimation batch.
///
/// Resolved once at call entry into a concrete worker count; there is no
/// dynamic branching on mixed-type flags downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExecMode {
    /// Process targets one at a time on the calling thread. The default.
    #[default]
    Sequential,
    /// Distribute targets across a fixed-size worker pool.
    Parallel {
        /// Number of pool workers; must be >= 1.
        workers: usize,
    },
    /// Distribute across `available_parallelism − 1` workers (at least 1).
    ParallelAuto,
}

/// Resolves an execution mode into a worker count.
///
/// `None` means sequential execution. Fails with
/// [`EstimateError::InvalidWorkerCount`] for `Parallel { workers: 0 }`.
pub(crate) fn resolve_workers(exec: &ExecMode) -> Result<Option<usize>, EstimateError> {
    match exec {
        ExecMode::Sequential => Ok(None),
        ExecMode::Parallel { workers } => {
            if *workers == 0 {
                Err(EstimateError::InvalidWorkerCount { workers: 0 })
            } else {
                Ok(Some(*workers))
            }
        }
        ExecMode::ParallelAuto => {
            let available = std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1);
            Ok(Some(available.saturating_sub(1).max(1)))
        }
    }
}

/// Configuration for a posterior estimation run.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use artemis_estimate::{EstimateConfig, ExecMode};
///
/// let config = EstimateConfig::new(0.001)
///     .with_ci_probs(0.05, 0.95)
///     .with_exec(ExecMode::ParallelAuto);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct EstimateConfig {
    /// Acceptance proportion for the rejection filter.
    proportion: f64,
    /// Standardization scale mode for the distance metric.
    scale: ScaleMode,
    /// Two-sided credible-interval probability levels.
    ci_probs: (f64, f64),
    /// Whether to apply regression adjustment to accepted samples.
    adjust: bool,
    /// Whether to compute MAP estimates.
    map: bool,
    /// Execution mode for the MAP batch.
    exec: ExecMode,
}

impl EstimateConfig {
    /// Creates a new configuration with the given acceptance proportion.
    ///
    /// Defaults: `ci_probs = (0.025, 0.975)`, `adjust = true`, `map = true`,
    /// `exec = Sequential`, `scale = SummaryRange`.
    pub fn new(proportion: f64) -> Self {
        Self {
            proportion,
            scale: ScaleMode::SummaryRange,
            ci_probs: (0.025, 0.975),
            adjust: true,
            map: true,
            exec: ExecMode::Sequential,
        }
    }

    /// Sets the standardization scale mode.
    pub fn with_scale(mut self, scale: ScaleMode) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the two-sided credible-interval probability levels.
    pub fn with_ci_probs(mut self, lower: f64, upper: f64) -> Self {
        self.ci_probs = (lower, upper);
        self
    }

    /// Enables or disables regression adjustment.
    pub fn with_adjust(mut self, adjust: bool) -> Self {
        self.adjust = adjust;
        self
    }

    /// Enables or disables MAP estimation.
    pub fn with_map(mut self, map: bool) -> Self {
        self.map = map;
        self
    }

    /// Sets the execution mode for the MAP batch.
    pub fn with_exec(mut self, exec: ExecMode) -> Self {
        self.exec = exec;
        self
    }

    /// Returns the acceptance proportion.
    pub fn proportion(&self) -> f64 {
        self.proportion
    }

    /// Returns the scale mode.
    pub fn scale(&self) -> &ScaleMode {
        &self.scale
    }

    /// Returns the credible-interval probability levels.
    pub fn ci_probs(&self) -> (f64, f64) {
        self.ci_probs
    }

    /// Returns whether regression adjustment is enabled.
    pub fn adjust(&self) -> bool {
        self.adjust
    }

    /// Returns whether MAP estimation is enabled.
    pub fn map(&self) -> bool {
        self.map
    }

    /// Returns the execution mode.
    pub fn exec(&self) -> &ExecMode {
        &self.exec
    }

    /// Validates this configuration.
    ///
    /// The proportion itself is validated by the rejection stage; this checks
    /// the probability levels and the worker count.
    pub fn validate(&self) -> Result<(), EstimateError> {
        let (lo, hi) = self.ci_probs;
        for p in [lo, hi] {
            if !p.is_finite() || p <= 0.0 || p >= 1.0 {
                return Err(EstimateError::InvalidProbability { p });
            }
        }
        if lo >= hi {
            return Err(EstimateError::ProbabilityOrder {
                lower: lo,
                upper: hi,
            });
        }
        resolve_workers(&self.exec)?;
        Ok(())
    }
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self::new(0.01)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = EstimateConfig::default();
        assert!((cfg.proportion() - 0.01).abs() < f64::EPSILON);
        assert_eq!(cfg.ci_probs(), (0.025, 0.975));
        assert!(cfg.adjust());
        assert!(cfg.map());
        assert_eq!(cfg.exec(), &ExecMode::Sequential);
    }

    #[test]
    fn test_builder_chaining() {
        let cfg = EstimateConfig::new(0.001)
            .with_ci_probs(0.1, 0.9)
            .with_adjust(false)
            .with_map(false)
            .with_exec(ExecMode::Parallel { workers: 4 });
        assert_eq!(cfg.ci_probs(), (0.1, 0.9));
        assert!(!cfg.adjust());
        assert!(!cfg.map());
        assert_eq!(cfg.exec(), &ExecMode::Parallel { workers: 4 });
    }

    #[test]
    fn test_validate_ok() {
        assert!(EstimateConfig::new(0.001).validate().is_ok());
    }

    #[test]
    fn test_validate_bad_probability() {
        let err = EstimateConfig::new(0.01)
            .with_ci_probs(0.0, 0.9)
            .validate()
            .unwrap_err();
        assert!(matches!(err, EstimateError::InvalidProbability { p } if p == 0.0));

        let err = EstimateConfig::new(0.01)
            .with_ci_probs(0.1, 1.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, EstimateError::InvalidProbability { .. }));
    }

    #[test]
    fn test_validate_probability_order() {
        let err = EstimateConfig::new(0.01)
            .with_ci_probs(0.9, 0.1)
            .validate()
            .unwrap_err();
        assert!(matches!(err, EstimateError::ProbabilityOrder { .. }));
    }

    #[test]
    fn test_validate_zero_workers() {
        let err = EstimateConfig::new(0.01)
            .with_exec(ExecMode::Parallel { workers: 0 })
            .validate()
            .unwrap_err();
        assert!(matches!(err, EstimateError::InvalidWorkerCount { workers: 0 }));
    }

    #[test]
    fn test_resolve_workers() {
        assert_eq!(resolve_workers(&ExecMode::Sequential).unwrap(), None);
        assert_eq!(
            resolve_workers(&ExecMode::Parallel { workers: 3 }).unwrap(),
            Some(3)
        );
        let auto = resolve_workers(&ExecMode::ParallelAuto).unwrap().unwrap();
        assert!(auto >= 1);
    }
}
