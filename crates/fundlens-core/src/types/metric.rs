//! Metric values that may be undefined.

use serde::Serialize;
use std::fmt;

use crate::error::{AnalyticsError, AnalyticsResult};

/// A ratio metric: either a number or an explicit undefined sentinel.
///
/// Undefined is neither a failure nor zero. It is reported to the caller and
/// only becomes an error if the caller insists on a number via [`Metric::value`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Metric {
    /// A defined value.
    Value {
        /// The metric value.
        value: f64,
    },
    /// No defined value exists for this input.
    Undefined {
        /// Why the metric is undefined.
        reason: String,
    },
}

impl Metric {
    /// Wraps a defined value.
    #[must_use]
    pub fn defined(value: f64) -> Self {
        Self::Value { value }
    }

    /// Creates an undefined metric.
    #[must_use]
    pub fn undefined(reason: impl Into<String>) -> Self {
        Self::Undefined {
            reason: reason.into(),
        }
    }

    /// Returns the value if defined.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Value { value } => Some(*value),
            Self::Undefined { .. } => None,
        }
    }

    /// Returns true if the metric is undefined.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined { .. })
    }

    /// Returns the value, or `UndefinedMetric` naming `metric`.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::UndefinedMetric` if the metric is undefined.
    pub fn value(&self, metric: &str) -> AnalyticsResult<f64> {
        match self {
            Self::Value { value } => Ok(*value),
            Self::Undefined { reason } => Err(AnalyticsError::undefined_metric(metric, reason)),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value { value } => match f.precision() {
                Some(p) => write!(f, "{value:.p$}"),
                None => write!(f, "{value}"),
            },
            Self::Undefined { .. } => f.write_str("n/a"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defined() {
        let m = Metric::defined(1.25);
        assert_eq!(m.as_f64(), Some(1.25));
        assert!(!m.is_undefined());
        assert_eq!(m.value("sharpe").unwrap(), 1.25);
        assert_eq!(format!("{m:.3}"), "1.250");
    }

    #[test]
    fn test_undefined() {
        let m = Metric::undefined("zero volatility");
        assert!(m.is_undefined());
        assert_eq!(m.as_f64(), None);
        assert_eq!(m.to_string(), "n/a");

        let err = m.value("sharpe ratio").unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::undefined_metric("sharpe ratio", "zero volatility")
        );
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_string(&Metric::defined(0.5)).unwrap();
        assert_eq!(json, r#"{"status":"value","value":0.5}"#);

        let json = serde_json::to_string(&Metric::undefined("flat")).unwrap();
        assert_eq!(json, r#"{"status":"undefined","reason":"flat"}"#);
    }
}
