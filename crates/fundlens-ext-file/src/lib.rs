//! # Fundlens File Sources
//!
//! [`FundDataSource`](fundlens_traits::FundDataSource) implementations backed
//! by CSV exports of the fund's spreadsheets, plus an in-memory source.
//!
//! ## Table Layout
//!
//! | File | Columns |
//! |------|---------|
//! | `prices.csv` | `Date,<TICKER>,<TICKER>...` |
//! | `holdings.csv` | `as_of_date,ticker,shares_held,weight,sector` |
//! | `fund.csv` | `date,nav` |
//! | `benchmarks.csv` (optional) | `Date,<INDEX>,<INDEX>...` |
//!
//! ## Example
//!
//! ```ignore
//! use fundlens_ext_file::CsvFundSource;
//! use fundlens_traits::FundDataSource;
//!
//! let source = CsvFundSource::open("data/", "Pacific Growth")?;
//! let snapshot = source.load(source.latest_date()?)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod csv_source;
mod memory;
pub mod tables;

pub use csv_source::{
    CsvFiles, CsvFundSource, BENCHMARKS_FILE, FUND_FILE, HOLDINGS_FILE, PRICES_FILE,
};
pub use memory::InMemorySource;
