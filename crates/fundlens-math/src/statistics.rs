//! Descriptive statistics over `f64` samples.

use crate::error::{MathError, MathResult};

/// Arithmetic mean of a sample.
///
/// # Errors
///
/// Returns `MathError::InsufficientData` for an empty sample.
pub fn mean(values: &[f64]) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance (Bessel-corrected, `n - 1` denominator).
///
/// # Errors
///
/// Returns `MathError::InsufficientData` if fewer than two values are given.
pub fn sample_variance(values: &[f64]) -> MathResult<f64> {
    if values.len() < 2 {
        return Err(MathError::insufficient_data(2, values.len()));
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Ok(sum_sq / (values.len() as f64 - 1.0))
}

/// Sample standard deviation (`ddof = 1`).
///
/// # Example
///
/// ```rust
/// use fundlens_math::sample_std_dev;
///
/// let sd = sample_std_dev(&[1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert!((sd - 1.2909944).abs() < 1e-6);
/// ```
pub fn sample_std_dev(values: &[f64]) -> MathResult<f64> {
    sample_variance(values).map(f64::sqrt)
}
