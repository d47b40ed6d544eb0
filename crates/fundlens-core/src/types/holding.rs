//! Fund holding representation.

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Sector label used when the source leaves a holding unclassified.
pub const UNCLASSIFIED_SECTOR: &str = "Unclassified";

/// A single position in the fund.
///
/// `shares_held` and `weight` are both optional: the source sheets often
/// carry one without the other. A holding with neither cannot take part in
/// contribution analysis and is reported as unresolvable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Instrument ticker, matching a price series key.
    pub ticker: String,

    /// Number of shares held.
    pub shares_held: Option<f64>,

    /// Portfolio weight as a fraction in `[0, 1]`.
    pub weight: Option<f64>,

    /// Sector classification.
    pub sector: String,
}

impl Holding {
    /// Creates a holding with no shares or weight and an unclassified sector.
    #[must_use]
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            shares_held: None,
            weight: None,
            sector: UNCLASSIFIED_SECTOR.to_string(),
        }
    }

    /// Sets the share count.
    #[must_use]
    pub fn with_shares(mut self, shares: f64) -> Self {
        self.shares_held = Some(shares);
        self
    }

    /// Sets the portfolio weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Sets the sector. A blank sector becomes [`UNCLASSIFIED_SECTOR`].
    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        let sector = sector.into();
        self.sector = if sector.trim().is_empty() {
            UNCLASSIFIED_SECTOR.to_string()
        } else {
            sector.trim().to_string()
        };
        self
    }

    /// Checks the holding's invariants.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidHolding` for a blank ticker, a weight
    /// outside `[0, 1]`, or a non-finite or negative share count.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.ticker.trim().is_empty() {
            return Err(AnalyticsError::invalid_holding(
                &self.ticker,
                "ticker must not be blank",
            ));
        }
        if let Some(w) = self.weight {
            if !w.is_finite() || !(0.0..=1.0).contains(&w) {
                return Err(AnalyticsError::invalid_holding(
                    &self.ticker,
                    format!("weight must be in [0, 1], got {w}"),
                ));
            }
        }
        if let Some(s) = self.shares_held {
            if !s.is_finite() || s < 0.0 {
                return Err(AnalyticsError::invalid_holding(
                    &self.ticker,
                    format!("shares held must be non-negative, got {s}"),
                ));
            }
        }
        Ok(())
    }

    /// Returns true if a share count is present.
    #[must_use]
    pub fn has_shares(&self) -> bool {
        self.shares_held.is_some()
    }

    /// Returns true if a weight is present.
    #[must_use]
    pub fn has_weight(&self) -> bool {
        self.weight.is_some()
    }

    /// Returns true if the holding carries enough data for contribution.
    #[must_use]
    pub fn is_resolvable(&self) -> bool {
        self.has_shares() || self.has_weight()
    }

    /// Market value at `price`, when a share count is present.
    #[must_use]
    pub fn market_value(&self, price: f64) -> Option<f64> {
        self.shares_held.map(|s| s * price)
    }
}
