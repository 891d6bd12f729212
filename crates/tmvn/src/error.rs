//! Error types for the artemis-tmvn crate.

/// Error type for all fallible operations in the artemis-tmvn crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TmvnError {
    /// Returned when the sample is empty.
    #[error("sample is empty")]
    EmptySample,

    /// Returned when the sample slice length is not divisible by n_params.
    #[error("sample length {len} is not divisible by n_params {n_params}")]
    ShapeMismatch {
        /// Length of the sample slice.
        len: usize,
        /// Expected number of parameter columns.
        n_params: usize,
    },

    /// Returned when a bounds vector length does not match n_params.
    #[error("{which} bounds length {len} does not match n_params {n_params}")]
    BoundsDimensionMismatch {
        /// Which bounds vector is malformed ("lower" or "upper").
        which: &'static str,
        /// Length of the bounds vector.
        len: usize,
        /// Expected number of parameter columns.
        n_params: usize,
    },

    /// Returned when a lower bound is not strictly below its upper bound.
    #[error("invalid bounds in parameter dimension {index}: lower >= upper")]
    InvalidBounds {
        /// Index of the offending parameter dimension.
        index: usize,
    },

    /// Returned when the sample contains non-finite values.
    #[error("sample contains non-finite values")]
    NonFiniteData,

    /// Returned when a sample value lies outside the truncation support.
    #[error("sample value outside truncation support in dimension {index}")]
    SampleOutOfBounds {
        /// Index of the offending parameter dimension.
        index: usize,
    },

    /// Returned when the maximum-likelihood optimization fails to converge.
    #[error("truncated normal fit failed to converge")]
    OptimizationFailed,
}
