//! In-memory fund data source.

use std::collections::BTreeMap;

use fundlens_core::{Date, Holding, PriceSeries};
use fundlens_traits::{FundDataSource, SourceError, SourceResult, SourceType};

use crate::csv_source::holdings_as_of;
use crate::tables::HoldingsTable;

/// Fund data held in memory, for tests and embedding.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    name: String,
    prices: BTreeMap<String, PriceSeries>,
    holdings: HoldingsTable,
    nav: PriceSeries,
    benchmarks: Vec<PriceSeries>,
}

impl InMemorySource {
    /// Creates a source with a NAV series and no holdings.
    pub fn new(nav: PriceSeries) -> Self {
        Self {
            name: nav.ticker().to_string(),
            prices: BTreeMap::new(),
            holdings: BTreeMap::new(),
            nav,
            benchmarks: Vec::new(),
        }
    }

    /// Adds a price series, replacing any series with the same ticker.
    #[must_use]
    pub fn with_prices(mut self, series: PriceSeries) -> Self {
        self.prices.insert(series.ticker().to_string(), series);
        self
    }

    /// Adds a holdings snapshot dated `as_of`.
    #[must_use]
    pub fn with_holdings(mut self, as_of: Date, holdings: Vec<Holding>) -> Self {
        self.holdings.insert(as_of, holdings);
        self
    }

    /// Adds a benchmark series after the existing ones.
    #[must_use]
    pub fn with_benchmark(mut self, series: PriceSeries) -> Self {
        self.benchmarks.push(series);
        self
    }
}

impl FundDataSource for InMemorySource {
    fn source_type(&self) -> SourceType {
        SourceType::Memory
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tickers(&self) -> Vec<String> {
        self.prices.keys().cloned().collect()
    }

    fn price_series(&self, ticker: &str) -> SourceResult<PriceSeries> {
        self.prices
            .get(ticker)
            .cloned()
            .ok_or_else(|| SourceError::not_found(format!("prices for {ticker}")))
    }

    fn holdings(&self, as_of: Date) -> SourceResult<Vec<Holding>> {
        holdings_as_of(&self.holdings, as_of)
    }

    fn fund_series(&self) -> SourceResult<PriceSeries> {
        Ok(self.nav.clone())
    }

    fn benchmark_series(&self) -> SourceResult<Vec<PriceSeries>> {
        Ok(self.benchmarks.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> Date {
        Date::from_ymd(2025, 4, day).unwrap()
    }

    #[test]
    fn test_holdings_pick_latest_snapshot() {
        let nav = PriceSeries::new("Fund", vec![(d(1), 1.0)]).unwrap();
        let source = InMemorySource::new(nav)
            .with_holdings(d(1), vec![Holding::new("OLD").with_weight(1.0)])
            .with_holdings(d(15), vec![Holding::new("NEW").with_weight(1.0)]);

        assert_eq!(source.holdings(d(14)).unwrap()[0].ticker, "OLD");
        assert_eq!(source.holdings(d(15)).unwrap()[0].ticker, "NEW");
        assert_eq!(source.holdings(d(30)).unwrap()[0].ticker, "NEW");

        let err = InMemorySource::new(PriceSeries::new("F", vec![(d(2), 1.0)]).unwrap())
            .with_holdings(d(2), vec![])
            .holdings(d(1))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_price_lookup() {
        let nav = PriceSeries::new("Fund", vec![(d(1), 1.0)]).unwrap();
        let source =
            InMemorySource::new(nav).with_prices(PriceSeries::new("A", vec![(d(1), 5.0)]).unwrap());

        assert_eq!(source.name(), "Fund");
        assert_eq!(source.tickers(), vec!["A".to_string()]);
        assert!(source.price_series("A").is_ok());
        assert!(matches!(source.price_series("B"), Err(SourceError::NotFound(_))));
    }

    #[test]
    fn test_benchmarks_keep_insertion_order() {
        let nav = PriceSeries::new("Fund", vec![(d(1), 1.0), (d(2), 1.1)]).unwrap();
        let source = InMemorySource::new(nav)
            .with_holdings(d(1), vec![])
            .with_benchmark(PriceSeries::new("SPX", vec![(d(1), 5000.0)]).unwrap())
            .with_benchmark(PriceSeries::new("NDX", vec![(d(1), 20000.0)]).unwrap());

        let names: Vec<String> = source
            .benchmark_series()
            .unwrap()
            .iter()
            .map(|s| s.ticker().to_string())
            .collect();
        assert_eq!(names, vec!["SPX".to_string(), "NDX".to_string()]);

        let snapshot = source.load(d(2)).unwrap();
        assert_eq!(snapshot.benchmarks()[1].ticker(), "NDX");
    }
}
