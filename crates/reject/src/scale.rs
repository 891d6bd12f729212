//! Per-dimension standardization scales.

use crate::error::RejectError;

/// Computes the per-dimension range (max − min) of the simulated summary
/// population, the default standardization reference.
///
/// Non-finite entries are skipped; a dimension with no finite values or with
/// zero width fails with [`RejectError::DegenerateScale`].
pub(crate) fn summary_ranges(
    summaries: &[f64],
    n_stats: usize,
    n_draws: usize,
) -> Result<Vec<f64>, RejectError> {
    let mut out = vec![0.0; n_stats];
    for (j, slot) in out.iter_mut().enumerate() {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for i in 0..n_draws {
            let v = summaries[i * n_stats + j];
            if !v.is_finite() {
                continue;
            }
            min = min.min(v);
            max = max.max(v);
        }
        let width = max - min;
        if !width.is_finite() || width <= 0.0 {
            return Err(RejectError::DegenerateScale { index: j });
        }
        *slot = width;
    }
    Ok(out)
}

/// Validates a caller-supplied fixed scale vector.
pub(crate) fn validate_fixed_scale(scale: &[f64], n_stats: usize) -> Result<(), RejectError> {
    if scale.len() != n_stats {
        return Err(RejectError::ScaleDimensionMismatch {
            scale: scale.len(),
            n_stats,
        });
    }
    for (j, &s) in scale.iter().enumerate() {
        if !s.is_finite() || s <= 0.0 {
            return Err(RejectError::DegenerateScale { index: j });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn ranges_hand_computed() {
        // 3 draws × 2 stats
        let summaries = [1.0, 10.0, 4.0, 30.0, 2.0, 20.0];
        let ranges = summary_ranges(&summaries, 2, 3).unwrap();
        assert_abs_diff_eq!(ranges[0], 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ranges[1], 20.0, epsilon = 1e-12);
    }

    #[test]
    fn ranges_skip_non_finite() {
        let summaries = [1.0, f64::NAN, 4.0, 30.0, 2.0, 20.0];
        let ranges = summary_ranges(&summaries, 2, 3).unwrap();
        assert_abs_diff_eq!(ranges[0], 3.0, epsilon = 1e-12);
        // column 1 range from the two finite values
        assert_abs_diff_eq!(ranges[1], 10.0, epsilon = 1e-12);
    }

    #[test]
    fn ranges_constant_column_fails() {
        let summaries = [1.0, 5.0, 2.0, 5.0, 3.0, 5.0];
        let err = summary_ranges(&summaries, 2, 3).unwrap_err();
        assert!(matches!(err, RejectError::DegenerateScale { index: 1 }));
    }

    #[test]
    fn ranges_all_nan_column_fails() {
        let summaries = [f64::NAN, f64::NAN];
        let err = summary_ranges(&summaries, 1, 2).unwrap_err();
        assert!(matches!(err, RejectError::DegenerateScale { index: 0 }));
    }

    #[test]
    fn fixed_scale_ok() {
        assert!(validate_fixed_scale(&[1.0, 0.5], 2).is_ok());
    }

    #[test]
    fn fixed_scale_wrong_length() {
        let err = validate_fixed_scale(&[1.0], 2).unwrap_err();
        assert!(matches!(
            err,
            RejectError::ScaleDimensionMismatch { scale: 1, n_stats: 2 }
        ));
    }

    #[test]
    fn fixed_scale_zero_fails() {
        let err = validate_fixed_scale(&[1.0, 0.0], 2).unwrap_err();
        assert!(matches!(err, RejectError::DegenerateScale { index: 1 }));
    }

    #[test]
    fn fixed_scale_nan_fails() {
        let err = validate_fixed_scale(&[f64::NAN], 1).unwrap_err();
        assert!(matches!(err, RejectError::DegenerateScale { index: 0 }));
    }
}
