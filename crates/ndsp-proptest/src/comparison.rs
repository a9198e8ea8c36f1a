//! Comparison utilities for checking transform output against a reference.

use std::fmt;

/// Result of comparing two buffers.
#[derive(Debug)]
pub struct ComparisonResult {
    pub max_abs_diff: f64,
    pub max_abs_diff_index: usize,
    pub rms_diff: f64,
    pub rms_expected: f64,
    pub mismatches: usize,
    pub total: usize,
}

impl ComparisonResult {
    /// RMS error relative to the RMS of the expected signal. Falls back to
    /// the absolute RMS error when the expected signal is silent.
    pub fn relative_rms(&self) -> f64 {
        if self.rms_expected > 0.0 {
            self.rms_diff / self.rms_expected
        } else {
            self.rms_diff
        }
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "max_abs_diff={} (at index {}), rms_diff={}, relative_rms={}, mismatches={}/{}",
            self.max_abs_diff,
            self.max_abs_diff_index,
            self.rms_diff,
            self.relative_rms(),
            self.mismatches,
            self.total,
        )
    }
}

/// Compare two f64 slices, returning detailed statistics.
pub fn compare_f64(actual: &[f64], expected: &[f64], tolerance: f64) -> ComparisonResult {
    assert_eq!(actual.len(), expected.len(), "Length mismatch");
    let total = actual.len();
    let mut max_abs_diff = 0.0f64;
    let mut max_abs_diff_index = 0;
    let mut sum_sq_diff = 0.0f64;
    let mut sum_sq_expected = 0.0f64;
    let mut mismatches = 0;

    for (i, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        sum_sq_diff += diff * diff;
        sum_sq_expected += e * e;
        if diff > max_abs_diff {
            max_abs_diff = diff;
            max_abs_diff_index = i;
        }
        if diff > tolerance {
            mismatches += 1;
        }
    }

    let mean = |sum: f64| if total > 0 { (sum / total as f64).sqrt() } else { 0.0 };
    ComparisonResult {
        max_abs_diff,
        max_abs_diff_index,
        rms_diff: mean(sum_sq_diff),
        rms_expected: mean(sum_sq_expected),
        mismatches,
        total,
    }
}

/// Assert two f64 slices are equal within absolute tolerance.
pub fn assert_f64_near(actual: &[f64], expected: &[f64], tolerance: f64) {
    let result = compare_f64(actual, expected, tolerance);
    assert!(
        result.mismatches == 0,
        "f64 comparison failed: {result}\n  actual[{}]={}, expected[{}]={}",
        result.max_abs_diff_index,
        actual[result.max_abs_diff_index],
        result.max_abs_diff_index,
        expected[result.max_abs_diff_index],
    );
}

/// Assert the RMS error of `actual`, relative to the RMS of `expected`, is
/// below `max_relative`.
pub fn assert_relative_rms(actual: &[f64], expected: &[f64], max_relative: f64) {
    let result = compare_f64(actual, expected, f64::INFINITY);
    assert!(
        result.relative_rms() <= max_relative,
        "relative RMS error above {max_relative}: {result}",
    );
}

/// Sum of squares.
pub fn energy(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_identical_passes() {
        let a = [1.0, 2.0, 3.0];
        assert_f64_near(&a, &a, 1e-12);
    }

    #[test]
    #[should_panic(expected = "f64 comparison failed")]
    fn near_beyond_tolerance_fails() {
        assert_f64_near(&[1.0, 2.0, 3.0], &[1.0, 2.1, 3.0], 1e-4);
    }

    #[test]
    fn compare_f64_statistics() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [1.1, 2.0, 3.05, 4.0];
        let result = compare_f64(&a, &b, 0.06);
        assert!((result.max_abs_diff - 0.1).abs() < 1e-12);
        assert_eq!(result.max_abs_diff_index, 0);
        assert_eq!(result.mismatches, 1);
        assert_eq!(result.total, 4);
    }

    #[test]
    fn relative_rms_scales_with_signal() {
        let expected = [100.0, -100.0, 100.0, -100.0];
        let actual = [101.0, -101.0, 101.0, -101.0];
        let result = compare_f64(&actual, &expected, 0.0);
        assert!((result.relative_rms() - 0.01).abs() < 1e-12);
        assert_relative_rms(&actual, &expected, 0.02);
    }

    #[test]
    #[should_panic(expected = "relative RMS error above")]
    fn relative_rms_detects_large_error() {
        assert_relative_rms(&[1.0, 0.0], &[0.0, 1.0], 0.5);
    }

    #[test]
    fn silent_reference_uses_absolute_error() {
        let result = compare_f64(&[0.5, 0.0], &[0.0, 0.0], 1.0);
        assert!((result.relative_rms() - 0.125f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn empty_slices_pass() {
        assert_f64_near(&[], &[], 1e-6);
        assert_relative_rms(&[], &[], 0.0);
        assert_eq!(energy(&[3.0, 4.0]), 25.0);
    }
}
