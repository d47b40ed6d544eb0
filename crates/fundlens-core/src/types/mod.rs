//! Core value types.

mod date;
mod holding;
mod metric;
mod series;
mod snapshot;

pub use date::Date;
pub use holding::{Holding, UNCLASSIFIED_SECTOR};
pub use metric::Metric;
pub use series::{Observation, PriceSeries, ReturnSeries, ReturnUnit};
pub use snapshot::{FundSnapshot, FundSnapshotBuilder, SnapshotId, DEFAULT_WEIGHT_SUM_TOLERANCE};
