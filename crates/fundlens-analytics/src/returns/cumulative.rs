//! Cumulative returns from a base date.

use std::fmt;

use fundlens_core::{
    AnalyticsError, AnalyticsResult, Date, Observation, PriceSeries, ReturnSeries, ReturnUnit,
};
use serde::Serialize;

use super::resolve;
use crate::config::AnalyticsConfig;

/// Cumulative percentage return of every observation from the base onward.
///
/// The base is the price on or before `base_date`, resolved with the same
/// `config.lookback_tolerance_days` limit as [`super::period_return`]. Each
/// point is `(price[t] - price[base]) / price[base] * 100`; the base
/// observation itself is included with value 0.
///
/// # Errors
///
/// Returns `InsufficientData` if no price exists at or before `base_date`, or
/// the nearest one is more than the tolerance earlier.
pub fn cumulative(
    series: &PriceSeries,
    base_date: Date,
    config: &AnalyticsConfig,
) -> AnalyticsResult<ReturnSeries> {
    let base = resolve(series, base_date, config.lookback_tolerance_days, "base")?;
    let base_idx = series.points().partition_point(|p| p.date < base.date);
    let points = &series.points()[base_idx..];

    ReturnSeries::with_unit(
        series.ticker(),
        ReturnUnit::Percent,
        points
            .iter()
            .map(|p| Observation::new(p.date, (p.value - base.value) / base.value * 100.0)),
    )
}

/// Calendar period a to-date return runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PeriodToDate {
    /// Week to date.
    #[serde(rename = "WTD")]
    Week,
    /// Month to date.
    #[serde(rename = "MTD")]
    Month,
    /// Year to date.
    #[serde(rename = "YTD")]
    Year,
}

impl PeriodToDate {
    /// Short label (`WTD`, `MTD`, `YTD`).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Week => "WTD",
            Self::Month => "MTD",
            Self::Year => "YTD",
        }
    }

    /// First trading day of the period containing `as_of`.
    #[must_use]
    pub fn first_trading_day(self, as_of: Date) -> Date {
        match self {
            Self::Week => as_of.week_first_trading_day(),
            Self::Month => as_of.month_first_trading_day(),
            Self::Year => as_of.year_first_trading_day(),
        }
    }
}

impl fmt::Display for PeriodToDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cumulative return from the close before `first_day` through the series.
///
/// When the series has no price within tolerance of that close it started
/// inside the period, and its first observation in `[first_day, period_end)`
/// is the base.
fn since_period_start(
    series: &PriceSeries,
    first_day: Date,
    period_end: Date,
    context: &str,
    config: &AnalyticsConfig,
) -> AnalyticsResult<ReturnSeries> {
    let prior_close = first_day.previous_trading_day();
    let tolerance = i64::from(config.lookback_tolerance_days);
    let has_prior_close = series
        .price_on_or_before(prior_close)
        .is_some_and(|o| o.date.days_between(&prior_close) <= tolerance);
    if has_prior_close {
        return cumulative(series, prior_close, config);
    }

    let first_in_period = series
        .points()
        .iter()
        .find(|p| p.date >= first_day && p.date < period_end)
        .ok_or_else(|| {
            AnalyticsError::insufficient_data_at(
                format!("{context} base for {}", series.ticker()),
                first_day,
            )
        })?;
    cumulative(series, first_in_period.date, config)
}

/// Cumulative return since the start of `year`.
///
/// The base is the last close before the year's first trading day. When the
/// series starts later in the year, the first observation of that year is the
/// base.
///
/// # Errors
///
/// Returns `InsufficientData` if the series has neither a close within
/// tolerance before the year starts nor any price during `year`.
pub fn since_start_of_year(
    series: &PriceSeries,
    year: i32,
    config: &AnalyticsConfig,
) -> AnalyticsResult<ReturnSeries> {
    let jan1 = Date::from_ymd(year, 1, 1)?;
    let next_jan1 = Date::from_ymd(year + 1, 1, 1)?;
    since_period_start(
        series,
        jan1.year_first_trading_day(),
        next_jan1,
        &format!("{year} year-to-date"),
        config,
    )
}

/// Week-, month- or year-to-date cumulative return ending at `as_of`.
///
/// Prices after `as_of` are ignored. The base is the last close before the
/// period's first trading day, or the series' first observation inside the
/// period when it starts later.
///
/// # Errors
///
/// Returns `InsufficientData` if the latest price is more than the lookback
/// tolerance before `as_of`, or the period base cannot be resolved.
pub fn period_to_date(
    series: &PriceSeries,
    period: PeriodToDate,
    as_of: Date,
    config: &AnalyticsConfig,
) -> AnalyticsResult<ReturnSeries> {
    let visible = series.truncate_after(as_of);
    resolve(&visible, as_of, config.lookback_tolerance_days, "end")?;
    since_period_start(
        &visible,
        period.first_trading_day(as_of),
        as_of.add_days(1),
        period.label(),
        config,
    )
}
