//! Fund data source trait.
//!
//! A [`FundDataSource`] exposes the three tables every analysis starts from:
//! per-ticker price histories, dated holdings, and the fund's NAV series.
//! Sources may also carry benchmark index histories.
//! [`FundDataSource::load`] assembles them into a validated [`FundSnapshot`].

use fundlens_core::types::DEFAULT_WEIGHT_SUM_TOLERANCE;
use fundlens_core::{AnalyticsError, Date, FundSnapshot, Holding, PriceSeries};
use tracing::{debug, warn};

use crate::error::{SourceError, SourceResult};

/// Where a source reads its data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// Files on disk (CSV exports).
    File,
    /// Values held in memory.
    Memory,
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Read access to one fund's data.
///
/// Implementations are synchronous; analytics run without an async runtime.
pub trait FundDataSource: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Fund name, used as the snapshot identity.
    fn name(&self) -> &str;

    /// Tickers with a price history.
    fn tickers(&self) -> Vec<String>;

    /// Full price history for `ticker`.
    ///
    /// Returns [`SourceError::NotFound`] if the ticker has no prices.
    fn price_series(&self, ticker: &str) -> SourceResult<PriceSeries>;

    /// Holdings from the latest holdings snapshot dated on or before `as_of`.
    fn holdings(&self, as_of: Date) -> SourceResult<Vec<Holding>>;

    /// Fund NAV history.
    fn fund_series(&self) -> SourceResult<PriceSeries>;

    /// Benchmark index histories, one series per index.
    ///
    /// Sources without benchmarks return an empty list.
    fn benchmark_series(&self) -> SourceResult<Vec<PriceSeries>> {
        Ok(Vec::new())
    }

    /// Date of the most recent NAV.
    fn latest_date(&self) -> SourceResult<Date> {
        let nav = self.fund_series()?;
        nav.last().map(|o| o.date).ok_or_else(|| {
            SourceError::from(AnalyticsError::insufficient_data(format!(
                "NAV series for {} is empty",
                self.name()
            )))
        })
    }

    /// Loads a snapshot as of `as_of` with the default weight-sum tolerance.
    fn load(&self, as_of: Date) -> SourceResult<FundSnapshot> {
        self.load_with_tolerance(as_of, DEFAULT_WEIGHT_SUM_TOLERANCE)
    }

    /// Loads a snapshot as of `as_of`.
    ///
    /// All series are cut at `as_of`, so later observations never reach the
    /// analytics. Holdings without any price on or before `as_of` are kept in
    /// the snapshot but get no series; contribution reports list them as not
    /// found. Benchmarks that start after `as_of` are dropped.
    fn load_with_tolerance(&self, as_of: Date, weight_tolerance: f64) -> SourceResult<FundSnapshot> {
        let nav = self.fund_series()?.truncate_after(as_of);
        if nav.is_empty() {
            return Err(AnalyticsError::insufficient_data_at(
                format!("NAV for {}", self.name()),
                as_of,
            )
            .into());
        }

        let holdings = self.holdings(as_of)?;
        let mut builder = FundSnapshot::builder()
            .name(self.name())
            .as_of_date(as_of)
            .nav_series(nav)
            .weight_sum_tolerance(weight_tolerance);

        for holding in &holdings {
            match self.price_series(&holding.ticker) {
                Ok(series) => {
                    let series = series.truncate_after(as_of);
                    if series.is_empty() {
                        warn!(ticker = %holding.ticker, as_of = %as_of, "no price on or before as-of date");
                    } else {
                        builder = builder.add_price_series(series);
                    }
                }
                Err(err) if err.is_not_found() => {
                    warn!(ticker = %holding.ticker, "no price series for holding");
                }
                Err(err) => return Err(err),
            }
        }

        for benchmark in self.benchmark_series()? {
            let benchmark = benchmark.truncate_after(as_of);
            if benchmark.is_empty() {
                warn!(benchmark = %benchmark.ticker(), as_of = %as_of, "benchmark starts after as-of date");
            } else {
                builder = builder.add_benchmark(benchmark);
            }
        }

        let snapshot = builder.holdings(holdings).build()?;
        debug!(
            source = %self.source_type(),
            fund = %snapshot.name(),
            as_of = %as_of,
            benchmarks = snapshot.benchmarks().len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }
}
