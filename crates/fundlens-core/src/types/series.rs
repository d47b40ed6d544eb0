//! Price and return series.

use serde::Serialize;

use super::Date;
use crate::error::{AnalyticsError, AnalyticsResult};

/// A single dated value in a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    /// Observation date.
    pub date: Date,
    /// Price, NAV, or return value.
    pub value: f64,
}

impl Observation {
    /// Creates a new observation.
    #[must_use]
    pub fn new(date: Date, value: f64) -> Self {
        Self { date, value }
    }
}

impl From<(Date, f64)> for Observation {
    fn from((date, value): (Date, f64)) -> Self {
        Self { date, value }
    }
}

/// Index of the last observation dated on or before `date`.
fn index_on_or_before(points: &[Observation], date: Date) -> Option<usize> {
    // partition_point returns the count of points with point.date <= date
    let n = points.partition_point(|p| p.date <= date);
    n.checked_sub(1)
}

fn check_strictly_increasing(label: &str, points: &[Observation]) -> AnalyticsResult<()> {
    for pair in points.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(AnalyticsError::invalid_series(
                label,
                format!(
                    "dates must be strictly increasing ({} follows {})",
                    pair[1].date, pair[0].date
                ),
            ));
        }
    }
    Ok(())
}

// =============================================================================
// PRICE SERIES
// =============================================================================

/// Ordered (date, price) pairs for one instrument or fund NAV.
///
/// Invariants, checked on construction:
/// - dates strictly increasing
/// - prices finite and strictly positive
///
/// Gaps are tolerated: lookups resolve to the nearest observation on or
/// before the requested date and never interpolate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    ticker: String,
    points: Vec<Observation>,
}

impl PriceSeries {
    /// Creates a validated price series.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidSeries` if dates are not strictly
    /// increasing or any price is non-positive or non-finite.
    pub fn new<P>(ticker: impl Into<String>, points: impl IntoIterator<Item = P>) -> AnalyticsResult<Self>
    where
        P: Into<Observation>,
    {
        let ticker = ticker.into();
        let points: Vec<Observation> = points.into_iter().map(Into::into).collect();

        if let Some(bad) = points.iter().find(|p| !p.value.is_finite() || p.value <= 0.0) {
            return Err(AnalyticsError::invalid_series(
                &ticker,
                format!("price must be positive, got {} on {}", bad.value, bad.date),
            ));
        }
        check_strictly_increasing(&ticker, &points)?;

        Ok(Self { ticker, points })
    }

    /// Returns the instrument ticker (or fund name for NAV series).
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns all observations in date order.
    #[must_use]
    pub fn points(&self) -> &[Observation] {
        &self.points
    }

    /// Returns the observation at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Observation> {
        self.points.get(index)
    }

    /// Returns the earliest observation.
    #[must_use]
    pub fn first(&self) -> Option<&Observation> {
        self.points.first()
    }

    /// Returns the latest observation.
    #[must_use]
    pub fn last(&self) -> Option<&Observation> {
        self.points.last()
    }

    /// Returns the prices in date order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Index of the last observation dated on or before `date`.
    #[must_use]
    pub fn index_on_or_before(&self, date: Date) -> Option<usize> {
        index_on_or_before(&self.points, date)
    }

    /// Returns the observation at or nearest before `date`.
    #[must_use]
    pub fn price_on_or_before(&self, date: Date) -> Option<&Observation> {
        self.index_on_or_before(date).map(|i| &self.points[i])
    }

    /// Returns a new series holding only observations dated on or before `date`.
    #[must_use]
    pub fn truncate_after(&self, date: Date) -> Self {
        let end = self.index_on_or_before(date).map_or(0, |i| i + 1);
        Self {
            ticker: self.ticker.clone(),
            points: self.points[..end].to_vec(),
        }
    }
}

// =============================================================================
// RETURN SERIES
// =============================================================================

/// Unit of the values in a [`ReturnSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnUnit {
    /// Dimensionless fraction (0.01 = 1%).
    Fraction,
    /// Percentage points (1.0 = 1%).
    Percent,
}

/// Ordered (date, return) pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSeries {
    label: String,
    unit: ReturnUnit,
    points: Vec<Observation>,
}

impl ReturnSeries {
    /// Creates a return series of fractional returns.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidSeries` if dates are not strictly
    /// increasing or a value is not finite.
    pub fn new<P>(label: impl Into<String>, points: impl IntoIterator<Item = P>) -> AnalyticsResult<Self>
    where
        P: Into<Observation>,
    {
        Self::with_unit(label, ReturnUnit::Fraction, points)
    }

    /// Creates a return series with an explicit unit.
    ///
    /// # Errors
    ///
    /// Same as [`ReturnSeries::new`].
    pub fn with_unit<P>(
        label: impl Into<String>,
        unit: ReturnUnit,
        points: impl IntoIterator<Item = P>,
    ) -> AnalyticsResult<Self>
    where
        P: Into<Observation>,
    {
        let label = label.into();
        let points: Vec<Observation> = points.into_iter().map(Into::into).collect();

        if let Some(bad) = points.iter().find(|p| !p.value.is_finite()) {
            return Err(AnalyticsError::invalid_series(
                &label,
                format!("return must be finite on {}", bad.date),
            ));
        }
        check_strictly_increasing(&label, &points)?;

        Ok(Self {
            label,
            unit,
            points,
        })
    }

    /// Builds a fractional return series from bare values, one per trading
    /// day starting at `start`. Convenient for tests and ad-hoc analysis.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidSeries` if a value is not finite.
    pub fn from_values(label: impl Into<String>, start: Date, values: &[f64]) -> AnalyticsResult<Self> {
        let mut date = if start.is_trading_day() {
            start
        } else {
            start.next_trading_day()
        };
        let mut points = Vec::with_capacity(values.len());
        for &v in values {
            points.push(Observation::new(date, v));
            date = date.next_trading_day();
        }
        Self::new(label, points)
    }

    /// Returns the series label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the unit of the values.
    #[must_use]
    pub fn unit(&self) -> ReturnUnit {
        self.unit
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns all observations in date order.
    #[must_use]
    pub fn points(&self) -> &[Observation] {
        &self.points
    }

    /// Returns the latest observation.
    #[must_use]
    pub fn last(&self) -> Option<&Observation> {
        self.points.last()
    }

    /// Returns the values in date order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Returns the observation at or nearest before `date`.
    #[must_use]
    pub fn value_on_or_before(&self, date: Date) -> Option<&Observation> {
        index_on_or_before(&self.points, date).map(|i| &self.points[i])
    }
}
