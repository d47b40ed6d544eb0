//! Error types for the Fundlens library.
//!
//! Every analytic failure is returned to the caller with its kind and
//! context. Nothing in the library converts a failure into `0.0`: a zero
//! return is a valid observation and would corrupt downstream rankings.

use fundlens_math::MathError;
use thiserror::Error;

use crate::types::Date;

/// A specialized Result type for Fundlens operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// The main error type for Fundlens operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Requested date or window has no resolvable data point.
    #[error("Insufficient data for {context}{}", .date.map(|d| format!(" at {d}")).unwrap_or_default())]
    InsufficientData {
        /// What was being computed, including the window when relevant.
        context: String,
        /// The offending date, if the failure is tied to one.
        date: Option<Date>,
        /// Observations needed, when the failure is a count shortfall.
        required: Option<usize>,
        /// Observations available, when the failure is a count shortfall.
        actual: Option<usize>,
    },

    /// Referenced ticker is absent from the data source.
    #[error("Ticker not found: {ticker}")]
    NotFound {
        /// The missing ticker.
        ticker: String,
    },

    /// Shares-based and weight-based inputs mixed within a single report.
    #[error("Ambiguous input: {reason}")]
    AmbiguousInput {
        /// Description of the conflict.
        reason: String,
    },

    /// A ratio metric has no defined value (e.g. zero variance).
    #[error("Undefined metric {metric}: {reason}")]
    UndefinedMetric {
        /// Name of the metric.
        metric: String,
        /// Why the metric is undefined.
        reason: String,
    },

    /// Series violates its construction invariants.
    #[error("Invalid series '{label}': {reason}")]
    InvalidSeries {
        /// Ticker or label of the series.
        label: String,
        /// The violated invariant.
        reason: String,
    },

    /// Holding violates its construction invariants.
    #[error("Invalid holding '{ticker}': {reason}")]
    InvalidHolding {
        /// The holding ticker.
        ticker: String,
        /// The reason the holding is invalid.
        reason: String,
    },

    /// Snapshot failed validation.
    #[error("Invalid snapshot: {reason}")]
    InvalidSnapshot {
        /// The reason the snapshot is invalid.
        reason: String,
    },

    /// Invalid argument to an analytic function.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// Numeric helper failure.
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl AnalyticsError {
    /// Creates an insufficient data error without a specific date.
    #[must_use]
    pub fn insufficient_data(context: impl Into<String>) -> Self {
        Self::InsufficientData {
            context: context.into(),
            date: None,
            required: None,
            actual: None,
        }
    }

    /// Creates an insufficient data error tied to a date.
    #[must_use]
    pub fn insufficient_data_at(context: impl Into<String>, date: Date) -> Self {
        Self::InsufficientData {
            context: context.into(),
            date: Some(date),
            required: None,
            actual: None,
        }
    }

    /// Creates an insufficient data error for too few observations.
    #[must_use]
    pub fn too_few_observations(context: impl Into<String>, required: usize, actual: usize) -> Self {
        Self::InsufficientData {
            context: format!(
                "{} (need at least {required} observations, got {actual})",
                context.into()
            ),
            date: None,
            required: Some(required),
            actual: Some(actual),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(ticker: impl Into<String>) -> Self {
        Self::NotFound {
            ticker: ticker.into(),
        }
    }

    /// Creates an ambiguous input error.
    #[must_use]
    pub fn ambiguous_input(reason: impl Into<String>) -> Self {
        Self::AmbiguousInput {
            reason: reason.into(),
        }
    }

    /// Creates an undefined metric error.
    #[must_use]
    pub fn undefined_metric(metric: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UndefinedMetric {
            metric: metric.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid series error.
    #[must_use]
    pub fn invalid_series(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSeries {
            label: label.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid holding error.
    #[must_use]
    pub fn invalid_holding(ticker: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHolding {
            ticker: ticker.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid snapshot error.
    #[must_use]
    pub fn invalid_snapshot(reason: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            reason: reason.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Returns true for failures caused by missing or too little data, as
    /// opposed to malformed input.
    #[must_use]
    pub fn is_data_gap(&self) -> bool {
        matches!(
            self,
            Self::InsufficientData { .. }
                | Self::NotFound { .. }
                | Self::Math(MathError::InsufficientData { .. })
        )
    }
}
