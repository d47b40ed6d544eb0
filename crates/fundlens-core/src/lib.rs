//! # Fundlens Core
//!
//! Core types and the error taxonomy for the Fundlens fund analytics library.
//!
//! This crate provides the value objects every analytic operates on:
//!
//! - **Dates**: [`Date`], a calendar date with trading-day helpers
//! - **Series**: [`PriceSeries`] (validated, strictly increasing, positive)
//!   and [`ReturnSeries`] (fractional or percentage returns)
//! - **Holdings**: [`Holding`] with optional share count and weight
//! - **Snapshots**: [`FundSnapshot`], the immutable unit of one data refresh
//! - **Metrics**: [`Metric`], a value or an explicit "undefined" sentinel
//!
//! ## Design Philosophy
//!
//! - **Validated on construction**: Invariants are checked once, when a value
//!   is built, so analytics never see a malformed series
//! - **Immutable**: Nothing is updated in place; a refresh builds a new snapshot
//! - **No silent zeros**: Missing data is an error or an explicit sentinel
//!
//! ## Example
//!
//! ```rust
//! use fundlens_core::prelude::*;
//!
//! let d1 = Date::from_ymd(2025, 1, 2).unwrap();
//! let d2 = Date::from_ymd(2025, 1, 3).unwrap();
//! let series = PriceSeries::new("AGIX", vec![(d1, 25.0), (d2, 25.5)]).unwrap();
//!
//! assert_eq!(series.len(), 2);
//! assert_eq!(series.price_on_or_before(d2).unwrap().value, 25.5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::types::{
        Date, FundSnapshot, FundSnapshotBuilder, Holding, Metric, Observation, PriceSeries,
        ReturnSeries, ReturnUnit, SnapshotId, UNCLASSIFIED_SECTOR,
    };
}

// Re-export commonly used types at crate root
pub use error::{AnalyticsError, AnalyticsResult};
pub use types::{
    Date, FundSnapshot, FundSnapshotBuilder, Holding, Metric, Observation, PriceSeries,
    ReturnSeries, ReturnUnit, SnapshotId, UNCLASSIFIED_SECTOR,
};
