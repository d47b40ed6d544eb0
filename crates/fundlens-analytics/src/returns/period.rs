//! Point-to-point and trailing-period returns.

use fundlens_core::{AnalyticsError, AnalyticsResult, Date, Observation, PriceSeries, ReturnSeries};
use serde::Serialize;
use tracing::debug;

use crate::config::AnalyticsConfig;

/// Standard trailing periods, counted in trading observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Period {
    /// One observation back (day-to-day).
    #[serde(rename = "1D")]
    OneDay,
    /// Five observations back.
    #[serde(rename = "5D")]
    FiveDays,
    /// Thirty observations back.
    #[serde(rename = "30D")]
    ThirtyDays,
    /// Ninety observations back.
    #[serde(rename = "90D")]
    NinetyDays,
    /// 252 observations back.
    #[serde(rename = "1Y")]
    OneYear,
}

impl Period {
    /// All standard periods, shortest first.
    pub const ALL: [Period; 5] = [
        Period::OneDay,
        Period::FiveDays,
        Period::ThirtyDays,
        Period::NinetyDays,
        Period::OneYear,
    ];

    /// Number of observations to step back from the latest one.
    #[must_use]
    pub fn observations(self) -> usize {
        match self {
            Self::OneDay => 1,
            Self::FiveDays => 5,
            Self::ThirtyDays => 30,
            Self::NinetyDays => 90,
            Self::OneYear => 252,
        }
    }

    /// Short display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::OneDay => "1D",
            Self::FiveDays => "5D",
            Self::ThirtyDays => "30D",
            Self::NinetyDays => "90D",
            Self::OneYear => "1Y",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Return over one trailing period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReturn {
    /// The period.
    pub period: Period,
    /// Date of the starting observation.
    pub start_date: Date,
    /// Date of the ending (latest) observation.
    pub end_date: Date,
    /// Fractional return.
    pub value: f64,
}

/// Trailing-period returns for one series.
///
/// Periods whose start would predate the first observation are listed in
/// `unavailable`. They never appear in `values` as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReturns {
    /// Ticker or fund label.
    pub label: String,
    /// Date of the latest observation.
    pub as_of: Date,
    /// Computable periods in request order.
    pub values: Vec<PeriodReturn>,
    /// Periods with too little history.
    pub unavailable: Vec<Period>,
}

impl PeriodReturns {
    /// Returns the value for `period`, if it was computable.
    #[must_use]
    pub fn get(&self, period: Period) -> Option<f64> {
        self.values
            .iter()
            .find(|r| r.period == period)
            .map(|r| r.value)
    }

    /// Returns true if `period` lacked history.
    #[must_use]
    pub fn is_unavailable(&self, period: Period) -> bool {
        self.unavailable.contains(&period)
    }
}

/// Price on or before `date`, no more than `tolerance_days` earlier.
pub(crate) fn resolve(
    series: &PriceSeries,
    date: Date,
    tolerance_days: u32,
    role: &str,
) -> AnalyticsResult<Observation> {
    let obs = series.price_on_or_before(date).ok_or_else(|| {
        AnalyticsError::insufficient_data_at(format!("{role} price for {}", series.ticker()), date)
    })?;

    let gap = obs.date.days_between(&date);
    if gap > i64::from(tolerance_days) {
        return Err(AnalyticsError::insufficient_data_at(
            format!(
                "{role} price for {} (nearest is {} days earlier, tolerance {tolerance_days})",
                series.ticker(),
                gap
            ),
            date,
        ));
    }
    Ok(*obs)
}

/// Return between two dates.
///
/// Each endpoint resolves to the price on or before the requested date, as
/// long as that price is no more than `config.lookback_tolerance_days`
/// calendar days earlier.
///
/// # Errors
///
/// - `InvalidInput` if `end` precedes `start`
/// - `InsufficientData` carrying the offending date if an endpoint cannot be
///   resolved
pub fn period_return(
    series: &PriceSeries,
    start: Date,
    end: Date,
    config: &AnalyticsConfig,
) -> AnalyticsResult<f64> {
    if end < start {
        return Err(AnalyticsError::invalid_input(format!(
            "period end {end} precedes start {start}"
        )));
    }

    let tolerance = config.lookback_tolerance_days;
    let p_start = resolve(series, start, tolerance, "start")?;
    let p_end = resolve(series, end, tolerance, "end")?;

    Ok((p_end.value - p_start.value) / p_start.value)
}

/// Trailing-period returns counted back from the latest observation.
///
/// # Errors
///
/// Returns `InsufficientData` if the series is empty.
pub fn returns(series: &PriceSeries, periods: &[Period]) -> AnalyticsResult<PeriodReturns> {
    let last_idx = series
        .len()
        .checked_sub(1)
        .ok_or_else(|| AnalyticsError::insufficient_data(format!("returns for {}", series.ticker())))?;
    let points = series.points();
    let end = points[last_idx];

    let mut values = Vec::with_capacity(periods.len());
    let mut unavailable = Vec::new();

    for &period in periods {
        match last_idx.checked_sub(period.observations()) {
            Some(start_idx) => {
                let start = points[start_idx];
                values.push(PeriodReturn {
                    period,
                    start_date: start.date,
                    end_date: end.date,
                    value: (end.value - start.value) / start.value,
                });
            }
            None => unavailable.push(period),
        }
    }

    if !unavailable.is_empty() {
        debug!(
            ticker = %series.ticker(),
            observations = series.len(),
            unavailable = ?unavailable,
            "periods lack history"
        );
    }

    Ok(PeriodReturns {
        label: series.ticker().to_string(),
        as_of: end.date,
        values,
        unavailable,
    })
}

/// Daily simple returns, `p[t] / p[t-1] - 1`, dated at `t`.
///
/// A series of `n` prices yields `n - 1` returns (none for `n < 2`).
///
/// # Errors
///
/// Propagates return-series construction failures, which cannot occur for a
/// validated price series.
pub fn simple_returns(series: &PriceSeries) -> AnalyticsResult<ReturnSeries> {
    let points = series
        .points()
        .windows(2)
        .map(|w| Observation::new(w[1].date, w[1].value / w[0].value - 1.0));
    ReturnSeries::new(series.ticker(), points)
}
