//! Error types for the artemis-reject crate.

/// Error type for all fallible operations in the artemis-reject crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RejectError {
    /// Returned when the simulated sample is empty.
    #[error("no simulated draws provided")]
    EmptySample,

    /// Returned when the acceptance proportion is outside (0, 1].
    #[error("acceptance proportion must be in (0, 1], got {proportion}")]
    InvalidProportion {
        /// The invalid proportion value.
        proportion: f64,
    },

    /// Returned when the parameter slice length is not divisible by n_params.
    #[error("parameters length {len} is not divisible by n_params {n_params}")]
    ParametersShapeMismatch {
        /// Length of the parameter slice.
        len: usize,
        /// Expected number of parameter columns.
        n_params: usize,
    },

    /// Returned when the summary slice length is not divisible by n_stats.
    #[error("summaries length {len} is not divisible by n_stats {n_stats}")]
    SummariesShapeMismatch {
        /// Length of the summary slice.
        len: usize,
        /// Expected number of summary columns.
        n_stats: usize,
    },

    /// Returned when parameter and summary row counts disagree.
    #[error("parameter rows {n_draws} do not match summary rows {n_summaries}")]
    DrawCountMismatch {
        /// Number of parameter draws.
        n_draws: usize,
        /// Number of summary rows.
        n_summaries: usize,
    },

    /// Returned when the observed summary length does not match n_stats.
    #[error("observed length {observed} does not match n_stats {n_stats}")]
    ObservedDimensionMismatch {
        /// Length of the observed summary vector.
        observed: usize,
        /// Expected number of summary columns.
        n_stats: usize,
    },

    /// Returned when a fixed scale vector length does not match n_stats.
    #[error("scale length {scale} does not match n_stats {n_stats}")]
    ScaleDimensionMismatch {
        /// Length of the scale vector.
        scale: usize,
        /// Expected number of summary columns.
        n_stats: usize,
    },

    /// Returned when a standardization scale is zero-width or non-finite.
    #[error("degenerate scale in summary dimension {index}")]
    DegenerateScale {
        /// Index of the offending summary dimension.
        index: usize,
    },

    /// Returned when a required input contains NaN or infinity.
    #[error("non-finite value in {input}")]
    NonFiniteInput {
        /// Name of the input containing the non-finite value.
        input: &'static str,
    },

    /// Returned when the target column set is empty.
    #[error("no target parameter columns selected")]
    NoTargetColumns,

    /// Returned when a target column index exceeds the parameter dimension.
    #[error("target column {col} out of range for n_params {n_params}")]
    TargetColumnOutOfRange {
        /// The offending column index.
        col: usize,
        /// Number of parameter columns.
        n_params: usize,
    },
}
