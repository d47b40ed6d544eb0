//! Combined risk metrics, single-series and per-ticker.

use fundlens_core::{AnalyticsError, AnalyticsResult, Metric, PriceSeries, ReturnSeries};
use serde::Serialize;
use tracing::{debug, warn};

use super::{annualized_volatility, max_drawdown, sharpe_ratio, value_at_risk, RiskParams};
use crate::config::AnalyticsConfig;
use crate::parallel::maybe_parallel_map;
use crate::returns::simple_returns;

/// Risk profile of one return series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskMetrics {
    /// Annualized volatility (fraction).
    pub annualized_volatility: f64,
    /// Maximum drawdown (non-positive fraction).
    pub max_drawdown: f64,
    /// Historical VaR at `var_confidence` (signed fraction).
    pub var_95: f64,
    /// Confidence level behind `var_95`.
    pub var_confidence: f64,
    /// Annualized Sharpe ratio, possibly undefined.
    pub sharpe_ratio: Metric,
    /// Number of returns used.
    pub observations: usize,
}

/// Computes all risk measures over the same returns.
///
/// # Errors
///
/// Returns `InsufficientData` for fewer than 2 returns.
pub fn risk_metrics(returns: &ReturnSeries, params: &RiskParams) -> AnalyticsResult<RiskMetrics> {
    let metrics = RiskMetrics {
        annualized_volatility: annualized_volatility(returns, params)?,
        max_drawdown: max_drawdown(returns)?,
        var_95: value_at_risk(returns, params)?,
        var_confidence: params.var_confidence,
        sharpe_ratio: sharpe_ratio(returns, params)?,
        observations: returns.len(),
    };

    debug!(
        label = %returns.label(),
        observations = metrics.observations,
        volatility = metrics.annualized_volatility,
        "computed risk metrics"
    );
    Ok(metrics)
}

/// Risk metrics for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerRisk {
    /// Instrument ticker.
    pub ticker: String,
    /// The ticker's risk profile.
    pub metrics: RiskMetrics,
}

/// A ticker whose risk metrics could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerFailure {
    /// Instrument ticker.
    pub ticker: String,
    /// Rendered error.
    pub reason: String,
    /// The underlying error.
    #[serde(skip)]
    pub error: AnalyticsError,
}

/// Per-ticker risk results.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct RiskBatch {
    /// Successful results in input order.
    pub metrics: Vec<TickerRisk>,
    /// Failed tickers in input order.
    pub failures: Vec<TickerFailure>,
}

impl RiskBatch {
    /// Finds the metrics for `ticker`.
    #[must_use]
    pub fn get(&self, ticker: &str) -> Option<&RiskMetrics> {
        self.metrics
            .iter()
            .find(|t| t.ticker == ticker)
            .map(|t| &t.metrics)
    }
}

/// Risk metrics from the daily simple returns of each price series.
///
/// Runs in parallel when `config.should_parallelize` allows it. A failing
/// ticker lands in `failures` and does not affect the others.
pub fn risk_metrics_by_ticker<'a, I>(
    series: I,
    params: &RiskParams,
    config: &AnalyticsConfig,
) -> RiskBatch
where
    I: IntoIterator<Item = &'a PriceSeries>,
{
    let series: Vec<&PriceSeries> = series.into_iter().collect();

    let results = maybe_parallel_map(&series, config, |s| {
        let outcome = simple_returns(s).and_then(|r| risk_metrics(&r, params));
        (s.ticker().to_string(), outcome)
    });

    let mut batch = RiskBatch::default();
    for (ticker, outcome) in results {
        match outcome {
            Ok(metrics) => batch.metrics.push(TickerRisk { ticker, metrics }),
            Err(error) => {
                warn!(ticker = %ticker, error = %error, "risk metrics unavailable");
                batch.failures.push(TickerFailure {
                    ticker,
                    reason: error.to_string(),
                    error,
                });
            }
        }
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use fundlens_core::Date;

    fn prices(ticker: &str, values: &[f64]) -> PriceSeries {
        let mut date = Date::from_ymd(2025, 3, 3).unwrap();
        let mut points = Vec::new();
        for &v in values {
            points.push((date, v));
            date = date.next_trading_day();
        }
        PriceSeries::new(ticker, points).unwrap()
    }

    #[test]
    fn test_risk_metrics_composes() {
        let r = ReturnSeries::from_values(
            "R",
            Date::from_ymd(2025, 1, 2).unwrap(),
            &[-0.05, -0.03, -0.01, 0.00, 0.01, 0.02, 0.04, 0.06, 0.08, 0.10],
        )
        .unwrap();
        let m = risk_metrics(&r, &RiskParams::default()).unwrap();

        assert_eq!(m.observations, 10);
        assert_abs_diff_eq!(m.var_95, -0.041, epsilon = 1e-12);
        assert!(m.max_drawdown <= 0.0);
        assert!(m.annualized_volatility > 0.0);
        assert!(!m.sharpe_ratio.is_undefined());
    }

    #[test]
    fn test_by_ticker_isolates_failures() {
        let good = prices("GOOD", &[10.0, 10.5, 10.2, 10.8]);
        let flat = prices("FLAT", &[5.0, 5.0, 5.0]);
        let short = prices("SHORT", &[7.0, 7.1]);

        let batch = risk_metrics_by_ticker(
            [&good, &flat, &short],
            &RiskParams::default(),
            &AnalyticsConfig::sequential(),
        );

        assert_eq!(batch.metrics.len(), 2);
        assert!(batch.get("GOOD").is_some());
        assert!(batch.get("FLAT").unwrap().sharpe_ratio.is_undefined());
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].ticker, "SHORT");
        assert!(batch.failures[0].error.is_data_gap());
    }

    #[test]
    fn test_by_ticker_parallel_matches_sequential() {
        let all: Vec<PriceSeries> = (0..20)
            .map(|i| {
                let base = 10.0 + f64::from(i);
                prices(&format!("T{i:02}"), &[base, base * 1.01, base * 0.99, base * 1.02])
            })
            .collect();

        let seq = risk_metrics_by_ticker(&all, &RiskParams::default(), &AnalyticsConfig::sequential());
        let par = risk_metrics_by_ticker(
            &all,
            &RiskParams::default(),
            &AnalyticsConfig::new().with_threshold(1),
        );
        assert_eq!(seq, par);
    }
}
