//! Per-column posterior summaries.

/// Median and two-sided credible-interval quantiles, one entry per column.
#[derive(Debug, Clone)]
pub(crate) struct ColumnSummary {
    pub(crate) median: Vec<f64>,
    pub(crate) ci_lower: Vec<f64>,
    pub(crate) ci_upper: Vec<f64>,
}

/// Summarizes each column of a flat row-major matrix.
///
/// # Panics
///
/// Debug-asserts a non-empty, well-shaped matrix; callers validate upstream.
pub(crate) fn summarize_columns(values: &[f64], n_cols: usize, probs: (f64, f64)) -> ColumnSummary {
    debug_assert!(n_cols >= 1);
    debug_assert!(!values.is_empty());
    debug_assert_eq!(values.len() % n_cols, 0);

    let n_rows = values.len() / n_cols;
    let mut median = Vec::with_capacity(n_cols);
    let mut ci_lower = Vec::with_capacity(n_cols);
    let mut ci_upper = Vec::with_capacity(n_cols);

    let mut column = vec![0.0; n_rows];
    for j in 0..n_cols {
        for (i, slot) in column.iter_mut().enumerate() {
            *slot = values[i * n_cols + j];
        }
        column.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        median.push(artemis_stats::median(&column));
        ci_lower.push(artemis_stats::quantile_type7(&column, probs.0));
        ci_upper.push(artemis_stats::quantile_type7(&column, probs.1));
    }

    ColumnSummary {
        median,
        ci_lower,
        ci_upper,
    }
}
