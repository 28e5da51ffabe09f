//! Testing helpers.

use assert_float_eq::*;

pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

pub fn assert_slice_f64_absolute(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_float_absolute_eq!(expected, actual, epsilon);
        }
    }
}

/// Asserts that a sampled statistic lies within `tolerance` of its analytical value, reporting both
/// in the panic message.
pub fn assert_converges(analytical: f64, sampled: f64, tolerance: f64) {
    assert!(
        (analytical - sampled).abs() <= tolerance,
        "sampled {sampled:.4} departs from analytical {analytical:.4} by more than {tolerance}"
    );
}
