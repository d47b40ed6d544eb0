//! Sharpe ratio.

use fundlens_core::{AnalyticsError, AnalyticsResult, Metric, ReturnSeries};
use fundlens_math::{mean, sample_std_dev};

use super::params::{fractional_values, RiskParams};

/// Standard deviations at or below this are treated as zero.
pub const ZERO_VOLATILITY_TOLERANCE: f64 = 1e-12;

/// Annualized Sharpe ratio:
/// `(mean(r) - rf) / std(r) * sqrt(annualization_factor)`.
///
/// A series with zero dispersion yields [`Metric::Undefined`], which is a
/// reportable outcome and not an error.
///
/// # Errors
///
/// Returns `InsufficientData` for fewer than 2 returns.
pub fn sharpe_ratio(returns: &ReturnSeries, params: &RiskParams) -> AnalyticsResult<Metric> {
    let values = fractional_values(returns)?;
    if values.len() < 2 {
        return Err(AnalyticsError::too_few_observations(
            format!("sharpe ratio of {}", returns.label()),
            2,
            values.len(),
        ));
    }

    let std = sample_std_dev(&values)?;
    if std <= ZERO_VOLATILITY_TOLERANCE {
        return Ok(Metric::undefined("returns have zero volatility"));
    }

    let excess = mean(&values)? - params.risk_free_rate;
    Ok(Metric::defined(
        excess / std * params.annualization_factor.sqrt(),
    ))
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
    fn test_sharpe() {
        let r = series(&[0.02, 0.0]);
        // mean 0.01, std sqrt(0.0002)
        let s = sharpe_ratio(&r, &RiskParams::default()).unwrap();
        assert_relative_eq!(
            s.as_f64().unwrap(),
            0.01 / 0.0002f64.sqrt() * 252f64.sqrt(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_sharpe_with_risk_free_rate() {
        let r = series(&[0.02, 0.0]);
        let params = RiskParams::default().with_risk_free_rate(0.01);
        let s = sharpe_ratio(&r, &params).unwrap();
        assert_relative_eq!(s.as_f64().unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_series_is_undefined() {
        let s = sharpe_ratio(&series(&[0.01; 20]), &RiskParams::default()).unwrap();
        assert!(s.is_undefined());
        assert!(s.value("sharpe ratio").is_err());
    }

    #[test]
    fn test_sharpe_needs_two_returns() {
        assert!(sharpe_ratio(&series(&[0.01]), &RiskParams::default()).is_err());
    }
}
