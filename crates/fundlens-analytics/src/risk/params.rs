//! Risk computation parameters.

use fundlens_core::{AnalyticsError, AnalyticsResult, ReturnSeries, ReturnUnit};
use fundlens_math::QuantileMethod;
use serde::{Deserialize, Serialize};

/// Parameters shared by the risk measures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskParams {
    /// Periods per year (252 for daily returns).
    pub annualization_factor: f64,
    /// Risk-free rate per period, same period as the returns.
    pub risk_free_rate: f64,
    /// Confidence level for value at risk.
    pub var_confidence: f64,
    /// Quantile rule for value at risk.
    pub quantile_method: QuantileMethod,
}

impl Default for RiskParams {
    fn default() -> Self {
        Self {
            annualization_factor: 252.0,
            risk_free_rate: 0.0,
            var_confidence: 0.95,
            quantile_method: QuantileMethod::Linear,
        }
    }
}

impl RiskParams {
    /// Creates default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the annualization factor.
    #[must_use]
    pub fn with_annualization_factor(mut self, factor: f64) -> Self {
        self.annualization_factor = factor;
        self
    }

    /// Sets the per-period risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Sets the per-period risk-free rate from an annual rate.
    #[must_use]
    pub fn with_annual_risk_free_rate(mut self, annual_rate: f64) -> Self {
        self.risk_free_rate = annual_rate / self.annualization_factor;
        self
    }

    /// Sets the VaR confidence level.
    #[must_use]
    pub fn with_var_confidence(mut self, confidence: f64) -> Self {
        self.var_confidence = confidence;
        self
    }

    /// Sets the VaR quantile method.
    #[must_use]
    pub fn with_quantile_method(mut self, method: QuantileMethod) -> Self {
        self.quantile_method = method;
        self
    }
}

/// Fractional values of a return series.
///
/// Risk measures are defined on fractional returns only; a percentage
/// series is rejected instead of silently scaled.
pub(crate) fn fractional_values(returns: &ReturnSeries) -> AnalyticsResult<Vec<f64>> {
    if returns.unit() != ReturnUnit::Fraction {
        return Err(AnalyticsError::invalid_input(format!(
            "risk measures need fractional returns, '{}' is in percent",
            returns.label()
        )));
    }
    Ok(returns.values())
}
