//! Parsers for the CSV tables.
//!
//! - prices: wide table, `Date,<TICKER>,<TICKER>...`; benchmarks share the
//!   layout with one column per index
//! - holdings: `as_of_date,ticker,shares_held,weight,sector`
//! - fund NAV: `date,nav`
//!
//! Parsers take any reader so they can be tested without touching disk.

use std::collections::{BTreeMap, HashSet};
use std::io::Read;

use fundlens_core::{Date, Holding, PriceSeries};
use fundlens_traits::{SourceError, SourceResult};
use serde::Deserialize;
use tracing::{debug, warn};

/// Holdings grouped by snapshot date.
pub type HoldingsTable = BTreeMap<Date, Vec<Holding>>;

enum Cell<'a> {
    Price(f64),
    Missing,
    Invalid(&'a str),
}

/// Blank and zero cells mean "no price"; a spreadsheet gap is never a price of 0.
fn price_cell(raw: &str) -> Cell<'_> {
    if raw.is_empty() {
        return Cell::Missing;
    }
    match raw.replace(',', "").parse::<f64>() {
        Ok(p) if p == 0.0 => Cell::Missing,
        Ok(p) if p.is_finite() && p > 0.0 => Cell::Price(p),
        _ => Cell::Invalid(raw),
    }
}

fn csv_error(location: &str, err: &csv::Error) -> SourceError {
    let at = err
        .position()
        .map_or_else(|| location.to_string(), |p| format!("{location}:{}", p.line()));
    SourceError::parse(at, err.to_string())
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input)
}

fn series_from_points(
    label: &str,
    mut points: Vec<(Date, f64)>,
    location: &str,
) -> SourceResult<PriceSeries> {
    points.sort_by_key(|(date, _)| *date);
    if let Some(w) = points.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(SourceError::parse(
            location,
            format!("{label} has two prices for {}", w[0].0),
        ));
    }
    Ok(PriceSeries::new(label, points)?)
}

/// Reads the wide price table into one series per ticker.
///
/// Rows may be in any date order. A blank, zero or non-numeric cell drops
/// that date for that ticker only; no value is carried forward. Tickers
/// without a single usable price are left out.
pub fn read_price_table<R: Read>(
    input: R,
    location: &str,
) -> SourceResult<BTreeMap<String, PriceSeries>> {
    let mut rdr = reader(input);
    let headers = rdr.headers().map_err(|e| csv_error(location, &e))?.clone();

    let mut columns = headers.iter();
    match columns.next() {
        Some(first) if first.eq_ignore_ascii_case("date") => {}
        _ => return Err(SourceError::parse(location, "first column must be 'Date'")),
    }
    let tickers: Vec<String> = columns.map(str::to_string).collect();

    let mut seen = HashSet::new();
    for ticker in tickers.iter().filter(|t| !t.is_empty()) {
        if !seen.insert(ticker.as_str()) {
            return Err(SourceError::parse(location, format!("duplicate ticker column {ticker}")));
        }
    }

    let mut points: Vec<Vec<(Date, f64)>> = vec![Vec::new(); tickers.len()];
    let mut skipped = 0usize;

    for record in rdr.records() {
        let record = record.map_err(|e| csv_error(location, &e))?;
        let line = record.position().map_or(0, csv::Position::line);
        let raw_date = record.get(0).unwrap_or_default();
        if raw_date.is_empty() {
            continue;
        }
        let date = Date::parse(raw_date)
            .map_err(|e| SourceError::parse(format!("{location}:{line}"), e.to_string()))?;

        for (i, ticker) in tickers.iter().enumerate() {
            if ticker.is_empty() {
                continue;
            }
            match price_cell(record.get(i + 1).unwrap_or_default()) {
                Cell::Price(p) => points[i].push((date, p)),
                Cell::Missing => skipped += 1,
                Cell::Invalid(raw) => {
                    warn!(ticker = %ticker, date = %date, value = raw, "skipping non-numeric price");
                    skipped += 1;
                }
            }
        }
    }

    let mut table = BTreeMap::new();
    for (ticker, pts) in tickers.into_iter().zip(points) {
        if ticker.is_empty() {
            continue;
        }
        if pts.is_empty() {
            warn!(ticker = %ticker, "ticker column has no usable prices");
            continue;
        }
        let series = series_from_points(&ticker, pts, location)?;
        table.insert(ticker, series);
    }

    debug!(location, tickers = table.len(), skipped, "read price table");
    Ok(table)
}

#[derive(Debug, Deserialize)]
struct HoldingRecord {
    #[serde(alias = "As_of_date", alias = "date")]
    as_of_date: String,
    #[serde(alias = "Ticker")]
    ticker: String,
    #[serde(default, alias = "Shares")]
    shares_held: Option<f64>,
    #[serde(default, alias = "Weight")]
    weight: Option<f64>,
    #[serde(default, alias = "Sector")]
    sector: Option<String>,
}

/// Reads the holdings table, grouped by `as_of_date`.
pub fn read_holdings_table<R: Read>(input: R, location: &str) -> SourceResult<HoldingsTable> {
    let mut rdr = reader(input);
    let mut table: HoldingsTable = BTreeMap::new();

    for result in rdr.deserialize::<HoldingRecord>() {
        let record = result.map_err(|e| csv_error(location, &e))?;
        if record.ticker.is_empty() {
            continue;
        }
        let at = format!("{location}: {} on {}", record.ticker, record.as_of_date);
        let date = Date::parse(&record.as_of_date)
            .map_err(|e| SourceError::parse(at.as_str(), e.to_string()))?;

        let mut holding = Holding::new(record.ticker);
        if let Some(shares) = record.shares_held {
            holding = holding.with_shares(shares);
        }
        if let Some(weight) = record.weight {
            holding = holding.with_weight(weight);
        }
        if let Some(sector) = record.sector {
            holding = holding.with_sector(sector);
        }
        holding
            .validate()
            .map_err(|e| SourceError::parse(at.as_str(), e.to_string()))?;

        table.entry(date).or_default().push(holding);
    }

    debug!(location, snapshots = table.len(), "read holdings table");
    Ok(table)
}

#[derive(Debug, Deserialize)]
struct NavRecord {
    #[serde(alias = "Date")]
    date: String,
    #[serde(alias = "NAV", alias = "Nav")]
    nav: String,
}

/// Reads the fund NAV table. Blank or zero NAVs are skipped like price cells.
pub fn read_nav_table<R: Read>(input: R, location: &str, fund: &str) -> SourceResult<PriceSeries> {
    let mut rdr = reader(input);
    let mut points = Vec::new();

    for result in rdr.deserialize::<NavRecord>() {
        let record = result.map_err(|e| csv_error(location, &e))?;
        if record.date.is_empty() {
            continue;
        }
        let date = Date::parse(&record.date)
            .map_err(|e| SourceError::parse(location, e.to_string()))?;
        match price_cell(&record.nav) {
            Cell::Price(nav) => points.push((date, nav)),
            Cell::Missing => {}
            Cell::Invalid(raw) => warn!(date = %date, value = raw, "skipping non-numeric NAV"),
        }
    }

    if points.is_empty() {
        return Err(SourceError::parse(location, "no usable NAV rows"));
    }
    series_from_points(fund, points, location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_cells() {
        assert!(matches!(price_cell("12.5"), Cell::Price(p) if (p - 12.5).abs() < 1e-12));
        assert!(matches!(price_cell("1,234.5"), Cell::Price(p) if (p - 1234.5).abs() < 1e-9));
        assert!(matches!(price_cell(""), Cell::Missing));
        assert!(matches!(price_cell("0"), Cell::Missing));
        assert!(matches!(price_cell("0.00"), Cell::Missing));
        assert!(matches!(price_cell("#N/A"), Cell::Invalid("#N/A")));
        assert!(matches!(price_cell("-3"), Cell::Invalid(_)));
    }

    #[test]
    fn test_wide_price_table() {
        let csv = "\
Date,AAA,BBB,CCC
2025-01-03,10.5,,0
2025-01-02,10.0,20.0,
2025-01-06,11.0,#N/A,
";
        let table = read_price_table(csv.as_bytes(), "prices.csv").unwrap();

        let aaa = &table["AAA"];
        assert_eq!(aaa.len(), 3);
        assert_eq!(aaa.first().unwrap().date, Date::from_ymd(2025, 1, 2).unwrap());
        assert_eq!(aaa.last().unwrap().value, 11.0);

        // blank and non-numeric cells drop the date; nothing is backfilled
        let bbb = &table["BBB"];
        assert_eq!(bbb.len(), 1);
        assert_eq!(bbb.values(), vec![20.0]);

        assert!(!table.contains_key("CCC"));
    }

    #[test]
    fn test_price_table_rejects_bad_header_and_dates() {
        let err = read_price_table("Ticker,AAA\n".as_bytes(), "prices.csv").unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));

        let err = read_price_table("Date,AAA\n01/02/2025,1.0\n".as_bytes(), "prices.csv")
            .unwrap_err();
        assert!(err.to_string().contains("prices.csv:2"));

        let err = read_price_table("Date,AAA,AAA\n".as_bytes(), "prices.csv").unwrap_err();
        assert!(err.to_string().contains("duplicate ticker"));
    }

    #[test]
    fn test_duplicate_dates() {
        let csv = "Date,AAA\n2025-01-02,1.0\n2025-01-02,1.1\n";
        let err = read_price_table(csv.as_bytes(), "prices.csv").unwrap_err();
        assert!(err.to_string().contains("two prices"));
    }

    #[test]
    fn test_holdings_table() {
        let csv = "\
as_of_date,ticker,shares_held,weight,sector
2025-01-31,AAA,100,0.6,Tech
2025-01-31,BBB,,0.4,
2025-02-28,AAA,120,,Tech
2025-02-28,CCC,,,
";
        let table = read_holdings_table(csv.as_bytes(), "holdings.csv").unwrap();
        assert_eq!(table.len(), 2);

        let jan = &table[&Date::from_ymd(2025, 1, 31).unwrap()];
        assert_eq!(jan[0].shares_held, Some(100.0));
        assert_eq!(jan[1].shares_held, None);
        assert_eq!(jan[1].weight, Some(0.4));
        assert_eq!(jan[1].sector, fundlens_core::UNCLASSIFIED_SECTOR);

        let feb = &table[&Date::from_ymd(2025, 2, 28).unwrap()];
        assert!(!feb[1].is_resolvable());
    }

    #[test]
    fn test_holdings_table_rejects_bad_weight() {
        let csv = "as_of_date,ticker,shares_held,weight,sector\n2025-01-31,AAA,,1.5,\n";
        let err = read_holdings_table(csv.as_bytes(), "holdings.csv").unwrap_err();
        assert!(err.to_string().contains("AAA"));

        let csv = "as_of_date,ticker,shares_held,weight,sector\n2025-01-31,AAA,lots,,\n";
        assert!(read_holdings_table(csv.as_bytes(), "holdings.csv").is_err());
    }

    #[test]
    fn test_nav_table() {
        let csv = "date,nav\n2025-01-03,10.2\n2025-01-02,10.0\n2025-01-06,\n";
        let nav = read_nav_table(csv.as_bytes(), "fund.csv", "Fund").unwrap();
        assert_eq!(nav.ticker(), "Fund");
        assert_eq!(nav.values(), vec![10.0, 10.2]);

        assert!(read_nav_table("date,nav\n".as_bytes(), "fund.csv", "Fund").is_err());
    }
}
