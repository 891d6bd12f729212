//! Output type for rejection-filter queries.

/// Result of a rejection-filter query.
///
/// Contains the accepted draw indices in ascending-distance order, their
/// distances, and the accepted parameter rows restricted to the target
/// columns.
#[derive(Debug, Clone)]
pub struct RejectResult {
    /// Original draw indices of the accepted rows, closest first.
    indices: Vec<usize>,
    /// Standardized distances of the accepted rows, ascending.
    distances: Vec<f64>,
    /// Accepted parameter rows restricted to the target columns,
    /// flat row-major `[n_accepted × n_cols]`.
    values: Vec<f64>,
    /// Number of target parameter columns per row.
    n_cols: usize,
}

impl RejectResult {
    /// Creates a new `RejectResult`.
    pub(crate) fn new(
        indices: Vec<usize>,
        distances: Vec<f64>,
        values: Vec<f64>,
        n_cols: usize,
    ) -> Self {
        Self {
            indices,
            distances,
            values,
            n_cols,
        }
    }

    /// Returns the original draw indices of the accepted rows, closest first.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns the standardized distances of the accepted rows, ascending.
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Returns the accepted parameter rows, flat row-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of target parameter columns per row.
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Returns the number of accepted draws.
    pub fn n_accepted(&self) -> usize {
        self.indices.len()
    }

    /// Returns one accepted parameter row.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n_accepted()`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n_cols..(i + 1) * self.n_cols]
    }

    /// Collects one target parameter column into an owned vector.
    ///
    /// # Panics
    ///
    /// Panics if `j >= n_cols()`.
    pub fn column(&self, j: usize) -> Vec<f64> {
        assert!(j < self.n_cols, "column {j} out of range");
        self.values
            .chunks_exact(self.n_cols)
            .map(|row| row[j])
            .collect()
    }
}
