//! Error types for data sources.

use fundlens_core::AnalyticsError;
use thiserror::Error;

/// A specialized Result type for data source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors raised while reading fund data.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Requested ticker or table not present in the source.
    #[error("not found: {0}")]
    NotFound(String),

    /// Underlying file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be parsed.
    #[error("parse error in {location}: {message}")]
    Parse {
        /// File and row, or other position, of the bad record.
        location: String,
        /// What was wrong with it.
        message: String,
    },

    /// Parsed data failed core validation.
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

impl SourceError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Returns true if the error means "absent" rather than "broken".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::Analytics(AnalyticsError::NotFound { .. })
        )
    }
}
