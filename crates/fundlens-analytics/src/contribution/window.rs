//! Windowed contribution over a fund snapshot.

use std::fmt;
use std::str::FromStr;

use fundlens_core::{AnalyticsError, AnalyticsResult, Date, FundSnapshot, PriceSeries};
use serde::Serialize;

use super::analyzer::{assemble, ContributionReport, MoveEntry, PriceMove};
use crate::config::AnalyticsConfig;
use crate::parallel::maybe_parallel_map;
use crate::returns::cumulative;

/// Window over which holding contribution is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionWindow {
    /// The last `n` observations of each holding; `Trailing(1)` is day-to-day.
    Trailing(usize),
    /// From the price on or before a reference date.
    Since(Date),
}

impl ContributionWindow {
    /// Day-to-day window.
    pub const DAILY: Self = Self::Trailing(1);

    /// Report label for the window.
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ContributionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trailing(n) => write!(f, "{n}D"),
            Self::Since(d) => write!(f, "since {d}"),
        }
    }
}

impl FromStr for ContributionWindow {
    type Err = AnalyticsError;

    /// Parses `30`, `30d` or `since:2025-01-01`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(date) = s.strip_prefix("since:") {
            return Ok(Self::Since(Date::parse(date)?));
        }
        let digits = s.trim_end_matches(['d', 'D']);
        match digits.parse::<usize>() {
            Ok(n) if n > 0 => Ok(Self::Trailing(n)),
            _ => Err(AnalyticsError::invalid_input(format!(
                "invalid contribution window '{s}', expected N or since:YYYY-MM-DD"
            ))),
        }
    }
}

/// Price move of one series over `window`, ending at `as_of`.
///
/// The window return is the cumulative return from the window base to the
/// as-of observation. The as-of observation must lie within
/// `config.lookback_tolerance_days` of `as_of`.
///
/// # Errors
///
/// Returns `InsufficientData` when the window start or end cannot be
/// resolved, and `InvalidInput` for `Trailing(0)`.
pub fn window_move(
    series: &PriceSeries,
    window: ContributionWindow,
    as_of: Date,
    config: &AnalyticsConfig,
) -> AnalyticsResult<PriceMove> {
    let end_idx = series.index_on_or_before(as_of).ok_or_else(|| {
        AnalyticsError::insufficient_data_at(format!("window end for {}", series.ticker()), as_of)
    })?;
    let end = series.points()[end_idx];
    if end.date.days_between(&as_of) > i64::from(config.lookback_tolerance_days) {
        return Err(AnalyticsError::insufficient_data_at(
            format!(
                "window end for {} (last price {} is stale)",
                series.ticker(),
                end.date
            ),
            as_of,
        ));
    }

    let base_date = match window {
        ContributionWindow::Trailing(0) => {
            return Err(AnalyticsError::invalid_input(
                "trailing window needs at least one observation",
            ))
        }
        ContributionWindow::Trailing(n) => {
            let start_idx = end_idx.checked_sub(n).ok_or_else(|| {
                AnalyticsError::too_few_observations(
                    format!("{window} window for {}", series.ticker()),
                    n + 1,
                    end_idx + 1,
                )
            })?;
            series.points()[start_idx].date
        }
        ContributionWindow::Since(date) => {
            if date > as_of {
                return Err(AnalyticsError::invalid_input(format!(
                    "window start {date} is after as-of date {as_of}"
                )));
            }
            date
        }
    };

    let growth = cumulative(&series.truncate_after(end.date), base_date, config)?;
    let (base, last) = match (growth.points().first(), growth.last()) {
        (Some(b), Some(l)) => (*b, *l),
        _ => {
            return Err(AnalyticsError::insufficient_data_at(
                format!("{window} window for {}", series.ticker()),
                base_date,
            ))
        }
    };
    let start_price = series
        .price_on_or_before(base.date)
        .map(|o| o.value)
        .ok_or_else(|| AnalyticsError::insufficient_data_at(series.ticker(), base.date))?;

    Ok(PriceMove {
        ticker: series.ticker().to_string(),
        start_date: base.date,
        start_price,
        end_date: end.date,
        end_price: end.value,
        change_pct: last.value / 100.0,
    })
}

/// Contribution of every holding in `snapshot` over `window`, ending at the
/// snapshot's as-of date.
///
/// Each holding's window is resolved independently, so one ticker's gap does
/// not affect the others.
///
/// # Errors
///
/// Same as [`super::contribution_report`].
pub fn windowed_contribution(
    snapshot: &FundSnapshot,
    window: ContributionWindow,
    fund_value: Option<f64>,
    config: &AnalyticsConfig,
) -> AnalyticsResult<ContributionReport> {
    let as_of = snapshot.as_of_date();
    let holdings = snapshot.holdings();

    let lookups = maybe_parallel_map(holdings, config, |h| {
        h.is_resolvable().then(|| {
            snapshot
                .price_series(&h.ticker)
                .and_then(|s| window_move(s, window, as_of, config))
        })
    });

    let entries: Vec<MoveEntry<'_>> = holdings.iter().zip(lookups).collect();
    assemble(window.label(), entries, fund_value)
}
