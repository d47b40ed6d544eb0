//! Drawdown from running peak.

use fundlens_core::{AnalyticsResult, Observation, ReturnSeries};

use super::params::fractional_values;

/// Drawdown at each date: `(wealth - peak) / peak`, where wealth is the
/// compounded growth `∏(1 + r)` and peak is its running maximum.
///
/// Every value is `<= 0`.
///
/// # Errors
///
/// Returns `InvalidInput` for a percentage series.
pub fn drawdown_series(returns: &ReturnSeries) -> AnalyticsResult<ReturnSeries> {
    let values = fractional_values(returns)?;
    let drawdowns = drawdowns(&values);

    ReturnSeries::new(
        returns.label(),
        returns
            .points()
            .iter()
            .zip(drawdowns)
            .map(|(p, dd)| Observation::new(p.date, dd)),
    )
}

/// Largest peak-to-trough decline, as a non-positive fraction.
///
/// Zero when wealth never falls below its running peak, including for an
/// empty series.
///
/// # Errors
///
/// Returns `InvalidInput` for a percentage series.
pub fn max_drawdown(returns: &ReturnSeries) -> AnalyticsResult<f64> {
    let values = fractional_values(returns)?;
    Ok(drawdowns(&values).into_iter().fold(0.0, f64::min))
}

fn drawdowns(returns: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(returns.len());
    let mut wealth = 1.0;
    let mut peak = f64::NEG_INFINITY;

    for r in returns {
        wealth *= 1.0 + r;
        peak = peak.max(wealth);
        // peak <= 0 only after a -100% return
        let dd = if peak > 0.0 { (wealth - peak) / peak } else { -1.0 };
        out.push(dd.min(0.0));
    }
    out
}
