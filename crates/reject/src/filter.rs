//! Top-k retention of the closest draws.

use std::cmp::Ordering;

/// Number of draws retained for a given sample size and acceptance proportion.
///
/// Returns `ceil(n × proportion)` clamped to `[1, n]`.
pub(crate) fn retain_count(n: usize, proportion: f64) -> usize {
    ((n as f64 * proportion).ceil() as usize).clamp(1, n)
}

/// Selects the `k` draws with the smallest distances.
///
/// Sorts `(distance, index)` pairs ascending with the original index as an
/// explicit tiebreak, so equal distances always resolve in draw order and the
/// selection is deterministic. Infinite distances (failed simulations) sort
/// last and are only retained if `k` exceeds the number of finite draws.
pub(crate) fn select_closest(distances: &[f64], k: usize) -> Vec<(f64, usize)> {
    debug_assert!(k >= 1);
    debug_assert!(k <= distances.len());

    let mut pairs: Vec<(f64, usize)> = distances.iter().copied().enumerate().map(|(i, d)| (d, i)).collect();
    pairs.sort_unstable_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.1.cmp(&b.1))
    });
    pairs.truncate(k);
    pairs
}
