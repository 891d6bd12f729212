//! Integration tests for regression adjustment.

use approx::assert_abs_diff_eq;
use artemis_adjust::{AdjustError, adjust_sample};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

/// Noise-free multivariate case: params are exact linear maps of two
/// summaries, so adjustment collapses every row onto the value at the
/// observed point and recovers the slopes.
#[test]
fn exact_multivariate_relation_recovered() {
    let n = 12;
    let mut summaries = Vec::with_capacity(n * 2);
    let mut params = Vec::with_capacity(n * 2);
    for i in 0..n {
        let s0 = i as f64 * 0.5;
        let s1 = (i as f64 * 0.37).sin() * 2.0;
        summaries.extend_from_slice(&[s0, s1]);
        // p0 = 2·s0 − s1 + 1,  p1 = 0.5·s1 + 3
        params.extend_from_slice(&[2.0 * s0 - s1 + 1.0, 0.5 * s1 + 3.0]);
    }
    let observed = [1.5, 0.25];
    let lower = [-100.0, -100.0];
    let upper = [100.0, 100.0];

    let result = adjust_sample(&params, 2, &summaries, 2, &observed, &lower, &upper).unwrap();

    let expected_p0 = 2.0 * observed[0] - observed[1] + 1.0;
    let expected_p1 = 0.5 * observed[1] + 3.0;
    for i in 0..n {
        assert_abs_diff_eq!(result.row(i)[0], expected_p0, epsilon = 1e-8);
        assert_abs_diff_eq!(result.row(i)[1], expected_p1, epsilon = 1e-8);
    }

    assert_abs_diff_eq!(result.coefficient(0, 0), 2.0, epsilon = 1e-8);
    assert_abs_diff_eq!(result.coefficient(1, 0), -1.0, epsilon = 1e-8);
    assert_abs_diff_eq!(result.coefficient(0, 1), 0.0, epsilon = 1e-8);
    assert_abs_diff_eq!(result.coefficient(1, 1), 0.5, epsilon = 1e-8);
}

/// With noisy data the adjusted sample concentrates around the true
/// regression value at the observed point.
#[test]
fn noisy_adjustment_reduces_spread() {
    let mut rng = StdRng::seed_from_u64(11);
    let noise = Normal::new(0.0, 0.05).unwrap();

    let n = 200;
    let mut summaries = Vec::with_capacity(n);
    let mut params = Vec::with_capacity(n);
    for _ in 0..n {
        let s = rng.random_range(0.0..4.0);
        summaries.push(s);
        params.push(1.5 * s + 2.0 + noise.sample(&mut rng));
    }
    let observed = [2.0];
    let result =
        adjust_sample(&params, 1, &summaries, 1, &observed, &[-50.0], &[50.0]).unwrap();

    let spread = |v: &[f64]| {
        let m = v.iter().sum::<f64>() / v.len() as f64;
        v.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / (v.len() - 1) as f64
    };
    let raw_var = spread(&params);
    let adj: Vec<f64> = (0..n).map(|i| result.row(i)[0]).collect();
    let adj_var = spread(&adj);

    assert!(
        adj_var < raw_var / 10.0,
        "adjustment did not shrink variance: raw {raw_var}, adjusted {adj_var}"
    );
    // Centered on the true value at the observed point
    let adj_mean = adj.iter().sum::<f64>() / n as f64;
    assert_abs_diff_eq!(adj_mean, 1.5 * 2.0 + 2.0, epsilon = 0.05);
}

/// Bound containment holds for every adjusted value, even when the raw
/// correction overshoots.
#[test]
fn adjusted_values_stay_in_bounds() {
    let mut rng = StdRng::seed_from_u64(23);
    let n = 50;
    let mut summaries = Vec::with_capacity(n * 2);
    let mut params = Vec::with_capacity(n * 2);
    for _ in 0..n {
        let s0 = rng.random_range(0.0..1.0);
        let s1 = rng.random_range(0.0..1.0);
        summaries.extend_from_slice(&[s0, s1]);
        params.extend_from_slice(&[10.0 * s0, 10.0 * s1]);
    }
    // Far-away observed point forces large corrections
    let observed = [5.0, -5.0];
    let lower = [0.0, 0.0];
    let upper = [10.0, 10.0];
    let result = adjust_sample(&params, 2, &summaries, 2, &observed, &lower, &upper).unwrap();
    for i in 0..n {
        for p in 0..2 {
            let v = result.row(i)[p];
            assert!(
                (lower[p]..=upper[p]).contains(&v),
                "row {i} param {p} out of bounds: {v}"
            );
        }
    }
}

/// Rank-deficiency is an explicit error, never silent NaN coefficients.
#[test]
fn singular_design_is_explicit() {
    // Second summary column is an exact copy of the first
    let n = 10;
    let mut summaries = Vec::with_capacity(n * 2);
    let mut params = Vec::with_capacity(n);
    for i in 0..n {
        let s = i as f64;
        summaries.extend_from_slice(&[s, s]);
        params.push(2.0 * s);
    }
    let result = adjust_sample(
        &params,
        1,
        &summaries,
        2,
        &[1.0, 1.0],
        &[-100.0],
        &[100.0],
    );
    assert!(matches!(result, Err(AdjustError::SingularDesign { .. })));
}

/// Too few accepted rows relative to the summary dimension.
#[test]
fn insufficient_rows_is_explicit() {
    let result = adjust_sample(
        &[1.0, 2.0, 3.0],
        1,
        &[1.0, 0.0, 2.0, 1.0, 3.0, 2.0],
        2,
        &[1.0, 1.0],
        &[0.0],
        &[10.0],
    );
    assert!(matches!(
        result,
        Err(AdjustError::InsufficientRows { rows: 3, need: 4 })
    ));
}
