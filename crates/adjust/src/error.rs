//! Error types for the artemis-adjust crate.

/// Error type for all fallible operations in the artemis-adjust crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AdjustError {
    /// Returned when the accepted sample is empty.
    #[error("accepted sample is empty")]
    EmptySample,

    /// Returned when there are too few accepted rows to fit the regression.
    #[error("insufficient accepted rows: got {rows}, need at least {need}")]
    InsufficientRows {
        /// Number of accepted rows provided.
        rows: usize,
        /// Minimum number of rows required.
        need: usize,
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
    #[error("parameter rows {params} do not match summary rows {summaries}")]
    RowCountMismatch {
        /// Number of parameter rows.
        params: usize,
        /// Number of summary rows.
        summaries: usize,
    },

    /// Returned when the observed summary length does not match n_stats.
    #[error("observed length {observed} does not match n_stats {n_stats}")]
    ObservedDimensionMismatch {
        /// Length of the observed summary vector.
        observed: usize,
        /// Expected number of summary columns.
        n_stats: usize,
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

    /// Returned when a required input contains NaN or infinity.
    #[error("non-finite value in {input}")]
    NonFiniteInput {
        /// Name of the input containing the non-finite value.
        input: &'static str,
    },

    /// Returned when the regression design matrix is rank-deficient.
    #[error("singular design matrix: no usable pivot in column {column}")]
    SingularDesign {
        /// Column of the normal-equations matrix where elimination failed.
        column: usize,
    },
}
