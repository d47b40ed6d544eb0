//! # Fundlens Analytics
//!
//! Return, risk and contribution analytics over fund snapshots.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations are stateless with explicit inputs
//! - **No silent zeros**: Missing data is an error, an exclusion list, or an
//!   explicit [`Metric::Undefined`](fundlens_core::Metric)
//! - **Config-driven constants**: Trading days, annualization threshold, VaR
//!   interpolation and tolerances live in [`AnalyticsConfig`]
//! - **Config-driven parallelism**: Optional rayon support with threshold-based switching
//!
//! ## Module Overview
//!
//! - [`returns`] - Period, trailing, cumulative and annualized returns
//! - [`risk`] - Volatility, drawdown, VaR, Sharpe ratio
//! - [`contribution`] - Per-holding price impact, ranking, sectors, movers
//! - [`comparison`] - Fund against benchmark indices over calendar periods
//! - [`config`] - [`AnalyticsConfig`] and validation
//!
//! ## Quick Start
//!
//! ```rust
//! use fundlens_analytics::prelude::*;
//! use fundlens_core::{Date, PriceSeries};
//!
//! let config = AnalyticsConfig::default();
//! let d1 = Date::from_ymd(2025, 1, 2).unwrap();
//! let d2 = Date::from_ymd(2025, 1, 3).unwrap();
//! let nav = PriceSeries::new("FUND", vec![(d1, 10.0), (d2, 10.2)]).unwrap();
//!
//! let r = period_return(&nav, d1, d2, &config).unwrap();
//! assert!((r - 0.02).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): rayon-based per-ticker batches

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]

pub mod comparison;
pub mod config;
pub mod contribution;
pub mod parallel;
pub mod returns;
pub mod risk;

pub use config::{AnalyticsConfig, Validate, ValidationError};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::comparison::{
        compare_to_benchmarks, snapshot_comparison, ComparisonMeasure, ComparisonReport,
        ComparisonRow,
    };
    pub use crate::config::{AnalyticsConfig, Validate};
    pub use crate::contribution::{
        contribution_report, large_movers, preferred_sector_allocation, sector_allocation,
        sector_allocation_by_count, sector_allocation_by_value, sector_contributions,
        windowed_contribution, AllocationBasis, ContributionMode, ContributionReport,
        ContributionWindow, PriceMove,
    };
    pub use crate::returns::{
        annualize, annualized_series_return, cumulative, period_return, period_to_date,
        returns, simple_returns, since_start_of_year, AnnualizedReturn, Period,
        PeriodReturns, PeriodToDate, ReturnBasis,
    };
    pub use crate::risk::{
        annualized_volatility, drawdown_series, max_drawdown, risk_metrics,
        risk_metrics_by_ticker, sharpe_ratio, value_at_risk, RiskMetrics, RiskParams,
    };
}
