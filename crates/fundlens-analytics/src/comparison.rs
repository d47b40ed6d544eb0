//! Fund performance against benchmark indices.
//!
//! Every row measures the same calendar periods ending at one as-of date:
//! day-to-day, week-, month- and year-to-date, since the start of a chosen
//! year, and since the series began. Week-to-date is anchored on the first
//! trading day of the as-of week; each period's base is the close before its
//! first trading day.

use std::fmt;

use fundlens_core::{AnalyticsError, AnalyticsResult, Date, FundSnapshot, PriceSeries};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::AnalyticsConfig;
use crate::parallel::maybe_parallel_map;
use crate::returns::{
    cumulative, period_to_date, resolve, returns, since_start_of_year, Period, PeriodToDate,
};

/// A period measured in a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMeasure {
    /// Latest observation against the one before.
    Day,
    /// Week to date.
    Week,
    /// Month to date.
    Month,
    /// Year to date.
    Year,
    /// Since the start of the report's reference year.
    SinceYear,
    /// Since the first observation.
    SinceInception,
}

impl ComparisonMeasure {
    /// All measures in report order.
    pub const ALL: [ComparisonMeasure; 6] = [
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Year,
        Self::SinceYear,
        Self::SinceInception,
    ];
}

impl fmt::Display for ComparisonMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Day => "DTD",
            Self::Week => "WTD",
            Self::Month => "MTD",
            Self::Year => "YTD",
            Self::SinceYear => "since year",
            Self::SinceInception => "since inception",
        })
    }
}

/// Returns of one series in a comparison, as fractions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// Fund or benchmark name.
    pub name: String,
    /// True for the fund's own row.
    pub is_fund: bool,
    /// Date of the latest observation used.
    pub last_date: Option<Date>,
    /// Day-to-day return.
    pub day: Option<f64>,
    /// Week-to-date return.
    pub week: Option<f64>,
    /// Month-to-date return.
    pub month: Option<f64>,
    /// Year-to-date return.
    pub year: Option<f64>,
    /// Return since the start of the reference year.
    pub since_year: Option<f64>,
    /// Return since the first observation.
    pub since_inception: Option<f64>,
    /// Measures the series has too little data for.
    pub unavailable: Vec<ComparisonMeasure>,
}

impl ComparisonRow {
    fn empty(name: &str, is_fund: bool) -> Self {
        Self {
            name: name.to_string(),
            is_fund,
            last_date: None,
            day: None,
            week: None,
            month: None,
            year: None,
            since_year: None,
            since_inception: None,
            unavailable: Vec::new(),
        }
    }

    fn slot(&mut self, measure: ComparisonMeasure) -> &mut Option<f64> {
        match measure {
            ComparisonMeasure::Day => &mut self.day,
            ComparisonMeasure::Week => &mut self.week,
            ComparisonMeasure::Month => &mut self.month,
            ComparisonMeasure::Year => &mut self.year,
            ComparisonMeasure::SinceYear => &mut self.since_year,
            ComparisonMeasure::SinceInception => &mut self.since_inception,
        }
    }

    /// Value of `measure`, if it was computable.
    #[must_use]
    pub fn get(&self, measure: ComparisonMeasure) -> Option<f64> {
        match measure {
            ComparisonMeasure::Day => self.day,
            ComparisonMeasure::Week => self.week,
            ComparisonMeasure::Month => self.month,
            ComparisonMeasure::Year => self.year,
            ComparisonMeasure::SinceYear => self.since_year,
            ComparisonMeasure::SinceInception => self.since_inception,
        }
    }
}

/// The fund and its benchmarks over the same periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// Date every period ends at.
    pub as_of: Date,
    /// Reference year for [`ComparisonMeasure::SinceYear`].
    pub since_year: i32,
    /// The fund's row.
    pub fund: ComparisonRow,
    /// One row per benchmark, in input order.
    pub benchmarks: Vec<ComparisonRow>,
}

impl ComparisonReport {
    /// Fund row first, then the benchmarks.
    pub fn rows(&self) -> impl Iterator<Item = &ComparisonRow> {
        std::iter::once(&self.fund).chain(&self.benchmarks)
    }

    /// Row for the benchmark called `name`.
    #[must_use]
    pub fn benchmark(&self, name: &str) -> Option<&ComparisonRow> {
        self.benchmarks.iter().find(|b| b.name == name)
    }

    /// Fund return minus the benchmark's, when both are available.
    #[must_use]
    pub fn excess_return(&self, benchmark: &str, measure: ComparisonMeasure) -> Option<f64> {
        let fund = self.fund.get(measure)?;
        let bench = self.benchmark(benchmark)?.get(measure)?;
        Some(fund - bench)
    }
}

fn measure_value(
    visible: &PriceSeries,
    measure: ComparisonMeasure,
    as_of: Date,
    since_year: i32,
    config: &AnalyticsConfig,
) -> AnalyticsResult<f64> {
    let growth = match measure {
        ComparisonMeasure::Day => {
            return returns(visible, &[Period::OneDay])?
                .get(Period::OneDay)
                .ok_or_else(|| {
                    AnalyticsError::too_few_observations(
                        format!("day-to-day return for {}", visible.ticker()),
                        2,
                        visible.len(),
                    )
                });
        }
        ComparisonMeasure::Week => period_to_date(visible, PeriodToDate::Week, as_of, config)?,
        ComparisonMeasure::Month => period_to_date(visible, PeriodToDate::Month, as_of, config)?,
        ComparisonMeasure::Year => period_to_date(visible, PeriodToDate::Year, as_of, config)?,
        ComparisonMeasure::SinceYear => since_start_of_year(visible, since_year, config)?,
        ComparisonMeasure::SinceInception => {
            let first = visible.first().ok_or_else(|| {
                AnalyticsError::insufficient_data(format!("first price for {}", visible.ticker()))
            })?;
            cumulative(visible, first.date, config)?
        }
    };
    growth
        .last()
        .map(|o| o.value / 100.0)
        .ok_or_else(|| AnalyticsError::insufficient_data(format!("{measure} for {}", visible.ticker())))
}

fn comparison_row(
    series: &PriceSeries,
    is_fund: bool,
    as_of: Date,
    since_year: i32,
    config: &AnalyticsConfig,
) -> AnalyticsResult<ComparisonRow> {
    let visible = series.truncate_after(as_of);
    let end = resolve(&visible, as_of, config.lookback_tolerance_days, "latest")?;

    let mut row = ComparisonRow::empty(series.ticker(), is_fund);
    row.last_date = Some(end.date);
    for measure in ComparisonMeasure::ALL {
        match measure_value(&visible, measure, as_of, since_year, config) {
            Ok(value) => *row.slot(measure) = Some(value),
            Err(error) => {
                debug!(name = %row.name, %measure, %error, "comparison measure unavailable");
                row.unavailable.push(measure);
            }
        }
    }
    Ok(row)
}

/// Compares the fund's returns with each benchmark's, all ending at `as_of`.
///
/// Prices after `as_of` are ignored. A benchmark whose latest value is more
/// than `config.lookback_tolerance_days` before `as_of` keeps its row with
/// every measure unavailable. Benchmarks run in parallel when the config
/// allows it.
///
/// # Errors
///
/// - `InvalidInput` if `since_year` is after the as-of year
/// - `InsufficientData` if the fund has no NAV within tolerance of `as_of`
pub fn compare_to_benchmarks(
    fund: &PriceSeries,
    benchmarks: &[PriceSeries],
    as_of: Date,
    since_year: i32,
    config: &AnalyticsConfig,
) -> AnalyticsResult<ComparisonReport> {
    if since_year > as_of.year() {
        return Err(AnalyticsError::invalid_input(format!(
            "reference year {since_year} is after as-of date {as_of}"
        )));
    }

    let fund_row = comparison_row(fund, true, as_of, since_year, config)?;
    let benchmark_rows = maybe_parallel_map(benchmarks, config, |b| {
        comparison_row(b, false, as_of, since_year, config).unwrap_or_else(|error| {
            warn!(benchmark = %b.ticker(), %error, "benchmark has no recent value");
            let mut row = ComparisonRow::empty(b.ticker(), false);
            row.unavailable = ComparisonMeasure::ALL.to_vec();
            row
        })
    });

    debug!(
        fund = %fund.ticker(),
        as_of = %as_of,
        benchmarks = benchmark_rows.len(),
        "built benchmark comparison"
    );
    Ok(ComparisonReport {
        as_of,
        since_year,
        fund: fund_row,
        benchmarks: benchmark_rows,
    })
}

/// [`compare_to_benchmarks`] over a snapshot's NAV and benchmarks.
pub fn snapshot_comparison(
    snapshot: &FundSnapshot,
    since_year: i32,
    config: &AnalyticsConfig,
) -> AnalyticsResult<ComparisonReport> {
    compare_to_benchmarks(
        snapshot.nav_series(),
        snapshot.benchmarks(),
        snapshot.as_of_date(),
        since_year,
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn series(name: &str, points: &[(Date, f64)]) -> PriceSeries {
        PriceSeries::new(name, points.iter().copied()).unwrap()
    }

    /// Fund and index from late 2023 to Wednesday 2025-08-06.
    fn fund() -> PriceSeries {
        series(
            "Fund",
            &[
                (d(2023, 12, 29), 8.0),
                (d(2024, 12, 31), 10.0),
                (d(2025, 7, 31), 11.0),
                (d(2025, 8, 1), 12.0),
                (d(2025, 8, 4), 12.3),
                (d(2025, 8, 5), 12.0),
                (d(2025, 8, 6), 12.6),
                (d(2025, 8, 7), 20.0),
            ],
        )
    }

    fn index() -> PriceSeries {
        series(
            "Index",
            &[
                (d(2024, 12, 31), 1000.0),
                (d(2025, 7, 31), 1050.0),
                (d(2025, 8, 1), 1100.0),
                (d(2025, 8, 5), 1111.0),
                (d(2025, 8, 6), 1122.0),
            ],
        )
    }

    #[test]
    fn test_fund_row_measures() {
        let config = AnalyticsConfig::sequential();
        let report = compare_to_benchmarks(&fund(), &[index()], d(2025, 8, 6), 2024, &config)
            .unwrap();
        let f = &report.fund;

        assert!(f.is_fund);
        // the 7th is after the as-of date
        assert_eq!(f.last_date, Some(d(2025, 8, 6)));
        assert_relative_eq!(f.day.unwrap(), 0.05, epsilon = 1e-12);
        // week starts Monday the 4th: base is Friday's 12.0
        assert_relative_eq!(f.week.unwrap(), 0.05, epsilon = 1e-12);
        // month starts Friday the 1st: base is July 31
        assert_relative_eq!(f.month.unwrap(), 12.6 / 11.0 - 1.0, epsilon = 1e-12);
        assert_relative_eq!(f.year.unwrap(), 0.26, epsilon = 1e-12);
        // 2024 base is the Dec 29, 2023 close
        assert_relative_eq!(f.since_year.unwrap(), 12.6 / 8.0 - 1.0, epsilon = 1e-12);
        assert_relative_eq!(f.since_inception.unwrap(), 12.6 / 8.0 - 1.0, epsilon = 1e-12);
        assert!(f.unavailable.is_empty());
    }

    #[test]
    fn test_benchmark_row_and_excess() {
        let config = AnalyticsConfig::sequential();
        let report = compare_to_benchmarks(&fund(), &[index()], d(2025, 8, 6), 2024, &config)
            .unwrap();
        let b = report.benchmark("Index").unwrap();

        assert!(!b.is_fund);
        assert_relative_eq!(b.week.unwrap(), 0.02, epsilon = 1e-12);
        assert_relative_eq!(b.year.unwrap(), 0.122, epsilon = 1e-12);
        // the index starts on the last day of 2024, which becomes the base
        assert_relative_eq!(b.since_year.unwrap(), 0.122, epsilon = 1e-12);

        assert_relative_eq!(
            report.excess_return("Index", ComparisonMeasure::Week).unwrap(),
            0.03,
            epsilon = 1e-12
        );
        assert!(report.excess_return("Missing", ComparisonMeasure::Week).is_none());
        assert_eq!(report.rows().count(), 2);
    }

    #[test]
    fn test_stale_benchmark_keeps_empty_row() {
        let stale = series("Old", &[(d(2025, 6, 2), 100.0), (d(2025, 6, 3), 101.0)]);
        let report = compare_to_benchmarks(
            &fund(),
            &[stale, index()],
            d(2025, 8, 6),
            2025,
            &AnalyticsConfig::sequential(),
        )
        .unwrap();

        assert_eq!(report.benchmarks[0].name, "Old");
        assert_eq!(report.benchmarks[0].last_date, None);
        assert_eq!(report.benchmarks[0].unavailable.len(), ComparisonMeasure::ALL.len());
        assert!(report.benchmarks[1].year.is_some());
    }

    #[test]
    fn test_short_history_marks_unavailable() {
        let new = series("New", &[(d(2025, 8, 6), 50.0)]);
        let report =
            compare_to_benchmarks(&fund(), &[new], d(2025, 8, 6), 2025, &AnalyticsConfig::default())
                .unwrap();
        let row = &report.benchmarks[0];

        assert!(row.unavailable.contains(&ComparisonMeasure::Day));
        assert_relative_eq!(row.week.unwrap(), 0.0);
        assert_relative_eq!(row.since_inception.unwrap(), 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let config = AnalyticsConfig::default();
        assert!(matches!(
            compare_to_benchmarks(&fund(), &[], d(2025, 8, 6), 2026, &config),
            Err(AnalyticsError::InvalidInput { .. })
        ));

        let err = compare_to_benchmarks(&fund(), &[], d(2026, 3, 2), 2025, &config).unwrap_err();
        assert!(err.is_data_gap());
    }

    #[test]
    fn test_snapshot_comparison() {
        let snapshot = FundSnapshot::builder()
            .name("Fund")
            .as_of_date(d(2025, 8, 6))
            .nav_series(fund().truncate_after(d(2025, 8, 6)))
            .add_benchmark(index())
            .build()
            .unwrap();

        let report = snapshot_comparison(&snapshot, 2024, &AnalyticsConfig::default()).unwrap();
        assert_eq!(report.as_of, d(2025, 8, 6));
        assert_eq!(report.benchmarks.len(), 1);
        assert_eq!(report.fund.name, "Fund");
    }
}
