//! Unconstrained reparameterization of the bounded mean.
//!
//! The optimizer works in an unconstrained space; a scaled logistic maps its
//! mean parameter into the open interval `(lower, upper)`, so the box
//! constraint holds by construction at every iterate.

/// Relative margin keeping the inverse transform away from the interval ends.
const EDGE_EPS: f64 = 1e-12;

#[inline]
fn logistic(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Maps an unconstrained value to the open interval `(lower, upper)`.
pub(crate) fn to_bounded(z: f64, lower: f64, upper: f64) -> f64 {
    lower + (upper - lower) * logistic(z)
}

/// Maps a value in `[lower, upper]` to the unconstrained space.
///
/// Values at (or numerically beyond) the interval ends are nudged inside by a
/// relative margin so the logit stays finite.
pub(crate) fn to_unconstrained(x: f64, lower: f64, upper: f64) -> f64 {
    let frac = ((x - lower) / (upper - lower)).clamp(EDGE_EPS, 1.0 - EDGE_EPS);
    (frac / (1.0 - frac)).ln()
}
