//! # Fundlens Traits
//!
//! Data source interface for the Fundlens fund analytics library.
//!
//! This crate holds only the trait and its error type. Implementations live
//! in extension crates such as `fundlens-ext-file`.
//!
//! ## Usage
//!
//! ```ignore
//! let source = CsvFundSource::open("data/", "Pacific Growth")?;
//! let as_of = source.latest_date()?;
//! let snapshot = source.load(as_of)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod source;

pub use error::{SourceError, SourceResult};
pub use source::{FundDataSource, SourceType};
