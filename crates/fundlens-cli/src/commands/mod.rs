//! CLI command implementations.

pub mod compare;
pub mod config;
pub mod contribution;
pub mod cumulative;
pub mod overview;
pub mod returns;
pub mod risk;
pub mod sectors;

pub use compare::CompareArgs;
pub use config::ConfigArgs;
pub use contribution::ContributionArgs;
pub use cumulative::CumulativeArgs;
pub use overview::OverviewArgs;
pub use returns::ReturnsArgs;
pub use risk::RiskArgs;
pub use sectors::SectorsArgs;

use std::path::PathBuf;

use anyhow::Context as _;
use fundlens_analytics::AnalyticsConfig;
use fundlens_core::{Date, FundSnapshot, PriceSeries};
use fundlens_ext_file::CsvFundSource;
use fundlens_traits::FundDataSource;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::settings::Settings;

/// Everything a command needs besides its own arguments.
#[derive(Debug)]
pub struct RunContext {
    /// Effective settings.
    pub settings: Settings,
    /// Config file the settings came from (it may not exist).
    pub config_path: PathBuf,
    /// `--data-dir`, overriding the config file.
    pub data_dir: Option<PathBuf>,
    /// `--as-of`, unparsed.
    pub as_of: Option<String>,
    /// Output format.
    pub format: OutputFormat,
}

/// A loaded source with the snapshot built from it.
pub struct Loaded {
    /// The CSV source, for tickers outside the snapshot.
    pub source: CsvFundSource,
    /// Snapshot as of the analysis date.
    pub snapshot: FundSnapshot,
}

impl Loaded {
    /// Price series for `ticker`, cut at the snapshot date.
    pub fn series(&self, ticker: &str) -> anyhow::Result<PriceSeries> {
        let series = self.source.price_series(ticker)?;
        Ok(series.truncate_after(self.snapshot.as_of_date()))
    }
}

impl RunContext {
    /// Analytics configuration.
    pub fn analytics(&self) -> &AnalyticsConfig {
        &self.settings.analytics
    }

    /// Data directory from the flag, or else the config file.
    pub fn data_dir(&self) -> CliResult<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| self.settings.data.dir.clone())
            .ok_or_else(|| CliError::MissingDataDir(self.config_path.display().to_string()))
    }

    /// Opens the CSV tables and builds the snapshot.
    pub fn load(&self) -> anyhow::Result<Loaded> {
        let dir = self.data_dir()?;
        let source = CsvFundSource::open(&dir, self.settings.data.fund_name.clone())
            .with_context(|| format!("reading fund data from {}", dir.display()))?;

        let as_of = match &self.as_of {
            Some(s) => parse_date(s)?,
            None => source.latest_date()?,
        };
        let snapshot = source
            .load_with_tolerance(as_of, self.analytics().weight_sum_tolerance)
            .with_context(|| format!("building snapshot as of {as_of}"))?;

        Ok(Loaded { source, snapshot })
    }
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}
