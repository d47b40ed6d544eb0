//! CSV-backed fund data source.

use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use fundlens_core::{Date, Holding, PriceSeries};
use fundlens_traits::{FundDataSource, SourceError, SourceResult, SourceType};
use tracing::{debug, info};

use crate::tables::{read_holdings_table, read_nav_table, read_price_table, HoldingsTable};

/// Default price table file name.
pub const PRICES_FILE: &str = "prices.csv";
/// Default holdings table file name.
pub const HOLDINGS_FILE: &str = "holdings.csv";
/// Default fund NAV file name.
pub const FUND_FILE: &str = "fund.csv";
/// Default benchmark table file name.
pub const BENCHMARKS_FILE: &str = "benchmarks.csv";

/// Paths of the CSV tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFiles {
    /// Wide price table.
    pub prices: PathBuf,
    /// Holdings table.
    pub holdings: PathBuf,
    /// Fund NAV table.
    pub fund: PathBuf,
    /// Wide benchmark table, same layout as the prices. Optional: a missing
    /// file means no benchmarks.
    pub benchmarks: PathBuf,
}

impl CsvFiles {
    /// The standard file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            prices: dir.join(PRICES_FILE),
            holdings: dir.join(HOLDINGS_FILE),
            fund: dir.join(FUND_FILE),
            benchmarks: dir.join(BENCHMARKS_FILE),
        }
    }
}

fn open(path: &Path) -> SourceResult<File> {
    File::open(path)
        .map_err(|e| SourceError::Io(io::Error::new(e.kind(), format!("{}: {e}", path.display()))))
}

/// Fund data read from CSV exports.
///
/// All tables are read eagerly on [`open`](Self::open); call
/// [`reload`](Self::reload) after the files change.
#[derive(Debug, Clone)]
pub struct CsvFundSource {
    name: String,
    files: CsvFiles,
    tables: Tables,
}

#[derive(Debug, Clone)]
struct Tables {
    prices: BTreeMap<String, PriceSeries>,
    holdings: HoldingsTable,
    nav: PriceSeries,
    benchmarks: BTreeMap<String, PriceSeries>,
}

impl CsvFundSource {
    /// Opens the standard tables in `dir`.
    pub fn open(dir: impl AsRef<Path>, name: impl Into<String>) -> SourceResult<Self> {
        Self::from_files(CsvFiles::in_dir(dir), name)
    }

    /// Opens tables at explicit paths.
    pub fn from_files(files: CsvFiles, name: impl Into<String>) -> SourceResult<Self> {
        let name = name.into();
        let tables = read_all(&files, &name)?;
        Ok(Self {
            name,
            files,
            tables,
        })
    }

    /// Re-reads every table. On failure the previous data is kept.
    pub fn reload(&mut self) -> SourceResult<()> {
        self.tables = read_all(&self.files, &self.name)?;
        Ok(())
    }

    /// Paths this source reads.
    pub fn files(&self) -> &CsvFiles {
        &self.files
    }

    /// Dates with a holdings snapshot.
    pub fn holding_dates(&self) -> Vec<Date> {
        self.tables.holdings.keys().copied().collect()
    }

    /// Names of the loaded benchmarks.
    pub fn benchmark_names(&self) -> Vec<String> {
        self.tables.benchmarks.keys().cloned().collect()
    }
}

fn read_all(files: &CsvFiles, name: &str) -> SourceResult<Tables> {
    let prices = read_price_table(open(&files.prices)?, &files.prices.display().to_string())?;
    let holdings =
        read_holdings_table(open(&files.holdings)?, &files.holdings.display().to_string())?;
    let nav = read_nav_table(open(&files.fund)?, &files.fund.display().to_string(), name)?;
    let benchmarks = if files.benchmarks.is_file() {
        read_price_table(
            open(&files.benchmarks)?,
            &files.benchmarks.display().to_string(),
        )?
    } else {
        debug!(path = %files.benchmarks.display(), "no benchmark table");
        BTreeMap::new()
    };

    info!(
        fund = name,
        tickers = prices.len(),
        holding_snapshots = holdings.len(),
        nav_points = nav.len(),
        benchmarks = benchmarks.len(),
        "loaded CSV tables"
    );
    Ok(Tables {
        prices,
        holdings,
        nav,
        benchmarks,
    })
}

/// Latest holdings snapshot dated on or before `as_of`.
pub(crate) fn holdings_as_of(table: &HoldingsTable, as_of: Date) -> SourceResult<Vec<Holding>> {
    table
        .range(..=as_of)
        .next_back()
        .map(|(_, h)| h.clone())
        .ok_or_else(|| SourceError::not_found(format!("holdings on or before {as_of}")))
}

impl FundDataSource for CsvFundSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tickers(&self) -> Vec<String> {
        self.tables.prices.keys().cloned().collect()
    }

    fn price_series(&self, ticker: &str) -> SourceResult<PriceSeries> {
        self.tables
            .prices
            .get(ticker)
            .cloned()
            .ok_or_else(|| SourceError::not_found(format!("prices for {ticker}")))
    }

    fn holdings(&self, as_of: Date) -> SourceResult<Vec<Holding>> {
        holdings_as_of(&self.tables.holdings, as_of)
    }

    fn fund_series(&self) -> SourceResult<PriceSeries> {
        Ok(self.tables.nav.clone())
    }

    fn benchmark_series(&self) -> SourceResult<Vec<PriceSeries>> {
        Ok(self.tables.benchmarks.values().cloned().collect())
    }
}
