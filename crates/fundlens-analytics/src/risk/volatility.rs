//! Annualized volatility.

use fundlens_core::{AnalyticsError, AnalyticsResult, ReturnSeries};
use fundlens_math::sample_std_dev;

use super::params::{fractional_values, RiskParams};

/// Sample standard deviation of returns scaled by `sqrt(annualization_factor)`.
///
/// # Errors
///
/// Returns `InsufficientData` for fewer than 2 returns.
pub fn annualized_volatility(returns: &ReturnSeries, params: &RiskParams) -> AnalyticsResult<f64> {
    let values = fractional_values(returns)?;
    if values.len() < 2 {
        return Err(AnalyticsError::too_few_observations(
            format!("volatility of {}", returns.label()),
            2,
            values.len(),
        ));
    }
    Ok(sample_std_dev(&values)? * params.annualization_factor.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fundlens_core::Date;

    fn series(values: &[f64]) -> ReturnSeries {
        ReturnSeries::from_values("R", Date::from_ymd(2025, 1, 2).unwrap(), values).unwrap()
    }

    #[test]
    fn test_volatility() {
        // sample std of [0.01, -0.01] is sqrt(0.0002)
        let v = annualized_volatility(&series(&[0.01, -0.01]), &RiskParams::default()).unwrap();
        assert_relative_eq!(v, 0.0002f64.sqrt() * 252f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_volatility_needs_two_returns() {
        let err = annualized_volatility(&series(&[0.01]), &RiskParams::default()).unwrap_err();
        assert!(matches!(err, AnalyticsError::InsufficientData { .. }));
    }

    #[test]
    fn test_constant_series_has_zero_volatility() {
        let v = annualized_volatility(&series(&[0.003; 10]), &RiskParams::default()).unwrap();
        assert!(v.abs() < 1e-12);
    }
}
