//! Historical value at risk.

use fundlens_core::{AnalyticsError, AnalyticsResult, ReturnSeries};
use fundlens_math::quantile;

use super::params::{fractional_values, RiskParams};

/// Historical VaR: the `(1 - confidence)` quantile of the returns.
///
/// Reported as a signed return, so a loss is negative. The interpolation
/// rule comes from `params.quantile_method`.
///
/// # Errors
///
/// - `InsufficientData` for an empty series
/// - `InvalidInput` for a confidence outside `(0, 1)`
pub fn value_at_risk(returns: &ReturnSeries, params: &RiskParams) -> AnalyticsResult<f64> {
    let values = fractional_values(returns)?;
    if values.is_empty() {
        return Err(AnalyticsError::too_few_observations(
            format!("value at risk of {}", returns.label()),
            1,
            0,
        ));
    }
    if !(params.var_confidence > 0.0 && params.var_confidence < 1.0) {
        return Err(AnalyticsError::invalid_input(format!(
            "VaR confidence must be in (0, 1), got {}",
            params.var_confidence
        )));
    }

    Ok(quantile(
        &values,
        1.0 - params.var_confidence,
        params.quantile_method,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use fundlens_core::Date;
    use fundlens_math::QuantileMethod;

    fn series(values: &[f64]) -> ReturnSeries {
        ReturnSeries::from_values("R", Date::from_ymd(2025, 1, 2).unwrap(), values).unwrap()
    }

    const SAMPLE: [f64; 10] = [
        -0.05, -0.03, -0.01, 0.00, 0.01, 0.02, 0.04, 0.06, 0.08, 0.10,
    ];

    #[test]
    fn test_var_linear() {
        let var = value_at_risk(&series(&SAMPLE), &RiskParams::default()).unwrap();
        assert_abs_diff_eq!(var, -0.041, epsilon = 1e-12);
    }

    #[test]
    fn test_var_nearest_rank() {
        let params = RiskParams::default().with_quantile_method(QuantileMethod::NearestRank);
        let var = value_at_risk(&series(&SAMPLE), &params).unwrap();
        assert_abs_diff_eq!(var, -0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_var_empty() {
        let err = value_at_risk(&series(&[]), &RiskParams::default()).unwrap_err();
        assert!(err.is_data_gap());
    }

    #[test]
    fn test_var_bad_confidence() {
        let params = RiskParams::default().with_var_confidence(1.0);
        assert!(value_at_risk(&series(&SAMPLE), &params).is_err());
    }
}
