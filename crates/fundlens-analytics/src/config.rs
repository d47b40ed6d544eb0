//! Configuration for analytics computation.

use fundlens_core::{AnalyticsError, AnalyticsResult};
use fundlens_math::QuantileMethod;
use serde::{Deserialize, Serialize};

use crate::risk::RiskParams;

/// Configuration for return, risk and contribution analytics.
///
/// Every field has a default, so a partial TOML table deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Trading days per year, used for annualization.
    pub trading_days_per_year: u32,

    /// Below this many days of history, annualization is skipped.
    pub min_annualization_days: u32,

    /// Maximum calendar-day gap between a requested date and the price that
    /// stands in for it in a period return.
    pub lookback_tolerance_days: u32,

    /// Tolerance on `|Σ weight − 1|` when a snapshot is built.
    pub weight_sum_tolerance: f64,

    /// Confidence level for value at risk.
    pub var_confidence: f64,

    /// Quantile rule for value at risk.
    pub quantile_method: QuantileMethod,

    /// Risk-free rate per period (same period as the returns).
    pub risk_free_rate: f64,

    /// Absolute price change that marks a large mover.
    pub large_move_threshold: f64,

    /// Enable parallel processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum batch size to trigger parallel processing.
    pub parallel_threshold: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trading_days_per_year: 252,
            min_annualization_days: 5,
            lookback_tolerance_days: 7,
            weight_sum_tolerance: 0.01,
            var_confidence: 0.95,
            quantile_method: QuantileMethod::Linear,
            risk_free_rate: 0.0,
            large_move_threshold: 0.02,
            parallel: true,
            parallel_threshold: 100,
        }
    }
}

impl AnalyticsConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the trading days per year.
    #[must_use]
    pub fn with_trading_days_per_year(mut self, days: u32) -> Self {
        self.trading_days_per_year = days;
        self
    }

    /// Sets the minimum history for annualization.
    #[must_use]
    pub fn with_min_annualization_days(mut self, days: u32) -> Self {
        self.min_annualization_days = days;
        self
    }

    /// Sets the lookback tolerance in calendar days.
    #[must_use]
    pub fn with_lookback_tolerance_days(mut self, days: u32) -> Self {
        self.lookback_tolerance_days = days;
        self
    }

    /// Sets the weight-sum tolerance.
    #[must_use]
    pub fn with_weight_sum_tolerance(mut self, tolerance: f64) -> Self {
        self.weight_sum_tolerance = tolerance;
        self
    }

    /// Sets the VaR confidence level.
    #[must_use]
    pub fn with_var_confidence(mut self, confidence: f64) -> Self {
        self.var_confidence = confidence;
        self
    }

    /// Sets the VaR quantile method.
    #[must_use]
    pub fn with_quantile_method(mut self, method: QuantileMethod) -> Self {
        self.quantile_method = method;
        self
    }

    /// Sets the per-period risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Sets the per-period risk-free rate from an annual rate.
    #[must_use]
    pub fn with_annual_risk_free_rate(mut self, annual_rate: f64) -> Self {
        self.risk_free_rate = annual_rate / f64::from(self.trading_days_per_year.max(1));
        self
    }

    /// Sets the large-mover threshold.
    #[must_use]
    pub fn with_large_move_threshold(mut self, threshold: f64) -> Self {
        self.large_move_threshold = threshold;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }

    /// Risk parameters derived from this config.
    #[must_use]
    pub fn risk_params(&self) -> RiskParams {
        RiskParams {
            annualization_factor: f64::from(self.trading_days_per_year),
            risk_free_rate: self.risk_free_rate,
            var_confidence: self.var_confidence,
            quantile_method: self.quantile_method,
        }
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Returns a list of validation errors, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and folds all errors into one `InvalidInput`.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidInput` listing every failed field.
    fn validate_or_error(&self) -> AnalyticsResult<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(AnalyticsError::invalid_input(format!(
            "invalid analytics config: {joined}"
        )))
    }
}

impl Validate for AnalyticsConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.trading_days_per_year == 0 {
            errors.push(ValidationError::new(
                "trading_days_per_year",
                "must be positive",
            ));
        }
        if self.min_annualization_days == 0 {
            errors.push(ValidationError::new(
                "min_annualization_days",
                "must be at least 1",
            ));
        }
        if !(self.weight_sum_tolerance.is_finite() && self.weight_sum_tolerance >= 0.0) {
            errors.push(ValidationError::new(
                "weight_sum_tolerance",
                "must be a non-negative number",
            ));
        }
        if !(self.var_confidence > 0.0 && self.var_confidence < 1.0) {
            errors.push(ValidationError::new(
                "var_confidence",
                format!("must be in (0, 1), got {}", self.var_confidence),
            ));
        }
        if !self.risk_free_rate.is_finite() {
            errors.push(ValidationError::new("risk_free_rate", "must be finite"));
        }
        if !(self.large_move_threshold.is_finite() && self.large_move_threshold >= 0.0) {
            errors.push(ValidationError::new(
                "large_move_threshold",
                "must be a non-negative number",
            ));
        }

        errors
    }
}
