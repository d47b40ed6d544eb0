//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    CompareArgs, ConfigArgs, ContributionArgs, CumulativeArgs, OverviewArgs, ReturnsArgs,
    RiskArgs, SectorsArgs,
};

/// Fundlens - fund returns, risk and contribution from snapshot files
#[derive(Parser, Debug)]
#[command(name = "fundlens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (defaults to <config dir>/fundlens/config.toml)
    #[arg(short, long, global = true, env = "FUNDLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding prices.csv, holdings.csv, fund.csv and optionally
    /// benchmarks.csv
    #[arg(short, long, global = true, env = "FUNDLENS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Analysis date (YYYY-MM-DD); defaults to the latest NAV date
    #[arg(long, global = true)]
    pub as_of: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Latest NAV, annualized return and fund risk
    Overview(OverviewArgs),

    /// Trailing period returns (1D, 5D, 30D, 90D, 1Y)
    Returns(ReturnsArgs),

    /// Cumulative return since a reference date
    Cumulative(CumulativeArgs),

    /// Volatility, drawdown, VaR and Sharpe ratio
    Risk(RiskArgs),

    /// Per-holding contribution to the fund's move
    Contribution(ContributionArgs),

    /// Sector allocation and sector contribution
    Sectors(SectorsArgs),

    /// Fund returns against benchmark indices (DTD, WTD, MTD, YTD)
    Compare(CompareArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
