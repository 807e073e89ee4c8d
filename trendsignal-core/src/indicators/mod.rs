//! Indicator implementations.
//!
//! Only the rolling mean is needed by the signal engine; it works on a plain
//! `&[f64]` so both the batch job and the dashboard feed it the same slice.

pub mod rolling_mean;

pub use rolling_mean::RollingMean;

#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "expected {expected}, got {actual} (epsilon {epsilon})"
    );
}
