//! Error types for the artemis-estimate crate.

use artemis_reject::RejectError;

/// Error type for global failures of the estimation pipeline.
///
/// Failures local to one inference target (regression adjustment, MAP fit)
/// are captured on that target's [`crate::TargetEstimate`] instead of being
/// raised here; only malformed shared configuration or inputs abort the
/// whole call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EstimateError {
    /// Returned when no inference targets were supplied.
    #[error("no inference targets provided")]
    NoTargets,

    /// Returned when two targets share an identifier.
    #[error("duplicate target id '{id}'")]
    DuplicateTargetId {
        /// The repeated identifier.
        id: String,
    },

    /// Returned when a credible-interval probability is outside (0, 1).
    #[error("credible-interval probability must be in (0, 1), got {p}")]
    InvalidProbability {
        /// The invalid probability.
        p: f64,
    },

    /// Returned when the credible-interval probabilities are not ordered.
    #[error("credible-interval probabilities not ordered: {lower} >= {upper}")]
    ProbabilityOrder {
        /// Lower probability level.
        lower: f64,
        /// Upper probability level.
        upper: f64,
    },

    /// Returned when an explicit worker count is not a positive integer.
    #[error("worker count must be >= 1, got {workers}")]
    InvalidWorkerCount {
        /// The invalid worker count.
        workers: usize,
    },

    /// Returned when the worker pool cannot be constructed.
    #[error("worker pool construction failed: {reason}")]
    WorkerPool {
        /// Underlying pool-build failure.
        reason: String,
    },

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Underlying serialization failure.
        reason: String,
    },

    /// A shared input failed rejection-stage validation.
    #[error(transparent)]
    Reject(#[from] RejectError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_no_targets() {
        let e = EstimateError::NoTargets;
        assert_eq!(e.to_string(), "no inference targets provided");
    }

    #[test]
    fn error_duplicate_target_id() {
        let e = EstimateError::DuplicateTargetId {
            id: "herd-3".to_string(),
        };
        assert_eq!(e.to_string(), "duplicate target id 'herd-3'");
    }

    #[test]
    fn error_invalid_probability() {
        let e = EstimateError::InvalidProbability { p: 1.2 };
        assert_eq!(
            e.to_string(),
            "credible-interval probability must be in (0, 1), got 1.2"
        );
    }

    #[test]
    fn error_probability_order() {
        let e = EstimateError::ProbabilityOrder {
            lower: 0.9,
            upper: 0.1,
        };
        assert_eq!(
            e.to_string(),
            "credible-interval probabilities not ordered: 0.9 >= 0.1"
        );
    }

    #[test]
    fn error_invalid_worker_count() {
        let e = EstimateError::InvalidWorkerCount { workers: 0 };
        assert_eq!(e.to_string(), "worker count must be >= 1, got 0");
    }

    #[test]
    fn error_reject_is_transparent() {
        let e = EstimateError::from(RejectError::EmptySample);
        assert_eq!(e.to_string(), "no simulated draws provided");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<EstimateError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<EstimateError>();
    }
}
