//! # Fundlens Math
//!
//! Numeric helpers shared by the Fundlens analytics crates.
//!
//! This crate provides:
//!
//! - **Statistics**: Mean, sample variance and sample standard deviation
//! - **Quantiles**: Order-statistic quantiles with a selectable interpolation rule
//!
//! ## Design Philosophy
//!
//! - **Explicit failure**: Empty or undersized inputs return [`MathError`], never `0.0`
//! - **Reference-matching**: The default quantile rule reproduces the
//!   spreadsheet/pandas `quantile` value so results reconcile against
//!   existing spreadsheet reports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod quantile;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::quantile::{quantile, QuantileMethod};
    pub use crate::statistics::{mean, sample_std_dev, sample_variance};
}

pub use error::{MathError, MathResult};
pub use quantile::{quantile, QuantileMethod};
pub use statistics::{mean, sample_std_dev, sample_variance};
