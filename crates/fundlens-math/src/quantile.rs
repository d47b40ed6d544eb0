//! Order-statistic quantiles.
//!
//! Different tools disagree on how to pick the value between two order
//! statistics, so the rule is an explicit [`QuantileMethod`] instead of a
//! hidden default. [`QuantileMethod::Linear`] matches pandas `quantile`,
//! numpy `percentile` and Excel `PERCENTILE.INC`.

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// Rule for resolving a quantile that falls between two order statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantileMethod {
    /// Linear interpolation at position `(n - 1) * p` (pandas/Excel default).
    #[default]
    Linear,
    /// Smallest value whose rank is at least `ceil(p * n)`.
    NearestRank,
    /// The order statistic at `floor((n - 1) * p)`, no interpolation.
    Lower,
}

impl QuantileMethod {
    /// Returns the configuration name of the method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::NearestRank => "nearest_rank",
            Self::Lower => "lower",
        }
    }
}

impl std::fmt::Display for QuantileMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computes the `p`-quantile of `values`.
///
/// The input does not need to be sorted; a sorted copy is taken.
///
/// # Arguments
///
/// * `values` - Sample values (must not contain NaN)
/// * `p` - Probability in `[0, 1]`
/// * `method` - Interpolation rule
///
/// # Example
///
/// ```rust
/// use fundlens_math::{quantile, QuantileMethod};
///
/// let xs = [4.0, 1.0, 3.0, 2.0];
/// let median = quantile(&xs, 0.5, QuantileMethod::Linear).unwrap();
/// assert!((median - 2.5).abs() < 1e-12);
/// ```
pub fn quantile(values: &[f64], p: f64, method: QuantileMethod) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(MathError::invalid_input(format!(
            "quantile probability must be in [0, 1], got {p}"
        )));
    }
    if values.iter().any(|v| v.is_nan()) {
        return Err(MathError::invalid_input("quantile input contains NaN"));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();

    let value = match method {
        QuantileMethod::Linear => {
            let h = (n - 1) as f64 * p;
            let lo = h.floor() as usize;
            let hi = (lo + 1).min(n - 1);
            let frac = h - lo as f64;
            sorted[lo] + frac * (sorted[hi] - sorted[lo])
        }
        QuantileMethod::NearestRank => {
            let rank = (p * n as f64).ceil().max(1.0) as usize;
            sorted[rank.min(n) - 1]
        }
        QuantileMethod::Lower => {
            let idx = ((n - 1) as f64 * p).floor() as usize;
            sorted[idx]
        }
    };

    Ok(value)
}
