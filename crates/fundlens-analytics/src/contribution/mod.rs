//! Contribution Analyzer.
//!
//! Decomposes a fund's move into per-holding price impact:
//! - Contribution from explicit price moves or from a snapshot window
//! - Ranking of top and bottom contributors
//! - Sector aggregation and sector allocation
//! - Large movers
//!
//! # Example
//!
//! ```rust
//! use fundlens_analytics::contribution::{contribution_report, PriceMove};
//! use fundlens_core::{Date, Holding};
//!
//! let d1 = Date::from_ymd(2025, 6, 2).unwrap();
//! let d2 = Date::from_ymd(2025, 6, 3).unwrap();
//! let holdings = vec![
//!     Holding::new("A").with_weight(0.6),
//!     Holding::new("B").with_weight(0.4),
//! ];
//! let moves = vec![
//!     PriceMove::new("A", d1, 100.0, d2, 110.0).unwrap(),
//!     PriceMove::new("B", d1, 100.0, d2, 95.0).unwrap(),
//! ];
//!
//! let report = contribution_report("1D", &holdings, &moves, Some(1000.0)).unwrap();
//! assert_eq!(report.top_contributors(1)[0].ticker, "A");
//! ```

mod analyzer;
mod movers;
mod sector;
mod window;

pub use analyzer::{
    contribution_report, ContributionMode, ContributionRecord, ContributionReport,
    ContributionSummary, ExcludedHolding, PriceMove,
};
pub use movers::{large_movers, LargeMovers};
pub use sector::{
    preferred_sector_allocation, sector_allocation, sector_allocation_by_count,
    sector_allocation_by_value, sector_contributions, AllocationBasis, SectorAllocation,
    SectorContribution, SectorWeight,
};
pub use window::{window_move, windowed_contribution, ContributionWindow};
