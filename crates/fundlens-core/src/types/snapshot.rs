//! Fund snapshot: the immutable unit of one data refresh.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::debug;

use super::{Date, Holding, PriceSeries};
use crate::error::{AnalyticsError, AnalyticsResult};

/// Default tolerance on `|Σ weight − 1|`.
pub const DEFAULT_WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Identity of a snapshot, for caller-side caching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SnapshotId {
    /// Fund name.
    pub name: String,
    /// As-of date of the snapshot.
    pub as_of: Date,
}

impl std::fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.name, self.as_of)
    }
}

/// Everything loaded for one fund as of one date.
///
/// Built fresh on each load and never mutated; a refresh replaces the whole
/// snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct FundSnapshot {
    name: String,
    as_of_date: Date,
    nav_series: PriceSeries,
    holdings: Vec<Holding>,
    prices: BTreeMap<String, PriceSeries>,
    benchmarks: Vec<PriceSeries>,
}

impl FundSnapshot {
    /// Creates a new snapshot builder.
    #[must_use]
    pub fn builder() -> FundSnapshotBuilder {
        FundSnapshotBuilder::new()
    }

    /// Returns the snapshot identity.
    #[must_use]
    pub fn id(&self) -> SnapshotId {
        SnapshotId {
            name: self.name.clone(),
            as_of: self.as_of_date,
        }
    }

    /// Returns the fund name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the as-of date.
    #[must_use]
    pub fn as_of_date(&self) -> Date {
        self.as_of_date
    }

    /// Returns the fund NAV series.
    #[must_use]
    pub fn nav_series(&self) -> &PriceSeries {
        &self.nav_series
    }

    /// Returns the holdings.
    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    /// Returns the number of holdings.
    #[must_use]
    pub fn holding_count(&self) -> usize {
        self.holdings.len()
    }

    /// Finds a holding by ticker.
    #[must_use]
    pub fn holding(&self, ticker: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.ticker == ticker)
    }

    /// Returns all price series keyed by ticker.
    #[must_use]
    pub fn prices(&self) -> &BTreeMap<String, PriceSeries> {
        &self.prices
    }

    /// Returns the price series for `ticker`.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::NotFound` if the snapshot has no series for it.
    pub fn price_series(&self, ticker: &str) -> AnalyticsResult<&PriceSeries> {
        self.prices
            .get(ticker)
            .ok_or_else(|| AnalyticsError::not_found(ticker))
    }

    /// Returns the benchmark series in load order.
    #[must_use]
    pub fn benchmarks(&self) -> &[PriceSeries] {
        &self.benchmarks
    }

    /// Finds a benchmark series by name.
    #[must_use]
    pub fn benchmark(&self, name: &str) -> Option<&PriceSeries> {
        self.benchmarks.iter().find(|b| b.ticker() == name)
    }

    /// Returns the latest NAV on or before the as-of date.
    #[must_use]
    pub fn latest_nav(&self) -> Option<f64> {
        self.nav_series
            .price_on_or_before(self.as_of_date)
            .map(|o| o.value)
    }
}

/// Builder for constructing a [`FundSnapshot`].
#[derive(Debug, Clone)]
pub struct FundSnapshotBuilder {
    name: Option<String>,
    as_of_date: Option<Date>,
    nav_series: Option<PriceSeries>,
    holdings: Vec<Holding>,
    prices: BTreeMap<String, PriceSeries>,
    benchmarks: Vec<PriceSeries>,
    weight_sum_tolerance: f64,
}

impl Default for FundSnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FundSnapshotBuilder {
    /// Creates a new builder with the default weight-sum tolerance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: None,
            as_of_date: None,
            nav_series: None,
            holdings: Vec::new(),
            prices: BTreeMap::new(),
            benchmarks: Vec::new(),
            weight_sum_tolerance: DEFAULT_WEIGHT_SUM_TOLERANCE,
        }
    }

    /// Sets the fund name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the as-of date.
    #[must_use]
    pub fn as_of_date(mut self, date: Date) -> Self {
        self.as_of_date = Some(date);
        self
    }

    /// Sets the fund NAV series.
    #[must_use]
    pub fn nav_series(mut self, series: PriceSeries) -> Self {
        self.nav_series = Some(series);
        self
    }

    /// Adds a holding.
    #[must_use]
    pub fn add_holding(mut self, holding: Holding) -> Self {
        self.holdings.push(holding);
        self
    }

    /// Sets all holdings (replacing any existing).
    #[must_use]
    pub fn holdings(mut self, holdings: Vec<Holding>) -> Self {
        self.holdings = holdings;
        self
    }

    /// Adds a price series, keyed by its ticker.
    #[must_use]
    pub fn add_price_series(mut self, series: PriceSeries) -> Self {
        self.prices.insert(series.ticker().to_string(), series);
        self
    }

    /// Adds multiple price series.
    #[must_use]
    pub fn add_price_series_batch(mut self, series: impl IntoIterator<Item = PriceSeries>) -> Self {
        for s in series {
            self.prices.insert(s.ticker().to_string(), s);
        }
        self
    }

    /// Adds a benchmark series (a comparison fund or index).
    #[must_use]
    pub fn add_benchmark(mut self, series: PriceSeries) -> Self {
        self.benchmarks.push(series);
        self
    }

    /// Sets the tolerance on `|Σ weight − 1|`.
    #[must_use]
    pub fn weight_sum_tolerance(mut self, tolerance: f64) -> Self {
        self.weight_sum_tolerance = tolerance;
        self
    }

    /// Builds and validates the snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - name, as-of date or NAV series is missing
    /// - a holding fails validation
    /// - a ticker appears twice in the holdings, or a name twice in the
    ///   benchmarks
    /// - every holding carries a weight and the weights do not sum to 1
    ///   within tolerance
    pub fn build(self) -> AnalyticsResult<FundSnapshot> {
        let name = self
            .name
            .ok_or_else(|| AnalyticsError::invalid_snapshot("missing fund name"))?;
        let as_of_date = self
            .as_of_date
            .ok_or_else(|| AnalyticsError::invalid_snapshot("missing as-of date"))?;
        let nav_series = self
            .nav_series
            .ok_or_else(|| AnalyticsError::invalid_snapshot("missing NAV series"))?;

        let mut seen = HashSet::new();
        for holding in &self.holdings {
            holding.validate()?;
            if !seen.insert(holding.ticker.as_str()) {
                return Err(AnalyticsError::invalid_snapshot(format!(
                    "duplicate holding ticker {}",
                    holding.ticker
                )));
            }
        }

        check_weight_sum(&self.holdings, self.weight_sum_tolerance)?;

        let mut names = HashSet::new();
        for benchmark in &self.benchmarks {
            if !names.insert(benchmark.ticker()) {
                return Err(AnalyticsError::invalid_snapshot(format!(
                    "duplicate benchmark {}",
                    benchmark.ticker()
                )));
            }
        }

        debug!(
            fund = %name,
            as_of = %as_of_date,
            holdings = self.holdings.len(),
            series = self.prices.len(),
            benchmarks = self.benchmarks.len(),
            "built fund snapshot"
        );

        Ok(FundSnapshot {
            name,
            as_of_date,
            nav_series,
            holdings: self.holdings,
            prices: self.prices,
            benchmarks: self.benchmarks,
        })
    }
}

fn check_weight_sum(holdings: &[Holding], tolerance: f64) -> AnalyticsResult<()> {
    if holdings.is_empty() || !holdings.iter().all(Holding::has_weight) {
        return Ok(());
    }
    let total: f64 = holdings.iter().filter_map(|h| h.weight).sum();
    if (total - 1.0).abs() > tolerance {
        return Err(AnalyticsError::invalid_snapshot(format!(
            "holding weights sum to {total:.4}, expected 1 within {tolerance}"
        )));
    }
    Ok(())
}
