//! Annualization of total returns.

use fundlens_core::{AnalyticsError, AnalyticsResult, PriceSeries};
use serde::Serialize;
use tracing::debug;

use crate::config::AnalyticsConfig;

/// Whether a reported return was annualized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnBasis {
    /// Compounded to a yearly rate.
    Annualized,
    /// Raw total return; history was too short to annualize.
    NonAnnualized,
}

/// An annualized return together with its basis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnualizedReturn {
    /// The reported return (fraction).
    pub value: f64,
    /// Whether `value` was annualized.
    pub basis: ReturnBasis,
    /// Trading days of history behind the figure.
    pub days_available: u32,
}

impl AnnualizedReturn {
    /// Returns true if the value is a raw total return.
    #[must_use]
    pub fn is_annualized(&self) -> bool {
        self.basis == ReturnBasis::Annualized
    }
}

/// Annualizes a total return earned over `days_available` trading days.
///
/// `(1 + total_return) ^ (trading_days_per_year / days_available) - 1`
///
/// With fewer than `config.min_annualization_days` days the raw total return
/// is reported instead, flagged [`ReturnBasis::NonAnnualized`].
///
/// # Errors
///
/// Returns `InvalidInput` for zero days, a non-finite return, or a return
/// below -100%.
///
/// # Example
///
/// ```rust
/// use fundlens_analytics::config::AnalyticsConfig;
/// use fundlens_analytics::returns::{annualize, ReturnBasis};
///
/// let short = annualize(0.05, 3, &AnalyticsConfig::default()).unwrap();
/// assert_eq!(short.basis, ReturnBasis::NonAnnualized);
/// assert_eq!(short.value, 0.05);
/// ```
pub fn annualize(
    total_return: f64,
    days_available: u32,
    config: &AnalyticsConfig,
) -> AnalyticsResult<AnnualizedReturn> {
    if days_available == 0 {
        return Err(AnalyticsError::invalid_input(
            "cannot annualize over zero days",
        ));
    }
    if !total_return.is_finite() || total_return < -1.0 {
        return Err(AnalyticsError::invalid_input(format!(
            "total return must be a finite value >= -1, got {total_return}"
        )));
    }

    if days_available < config.min_annualization_days {
        debug!(
            days_available,
            min = config.min_annualization_days,
            "history too short, reporting total return"
        );
        return Ok(AnnualizedReturn {
            value: total_return,
            basis: ReturnBasis::NonAnnualized,
            days_available,
        });
    }

    let exponent = f64::from(config.trading_days_per_year) / f64::from(days_available);
    Ok(AnnualizedReturn {
        value: (1.0 + total_return).powf(exponent) - 1.0,
        basis: ReturnBasis::Annualized,
        days_available,
    })
}

/// Annualized first-to-last return of a whole series.
///
/// The history length is the number of steps between observations
/// (`len - 1`).
///
/// # Errors
///
/// Returns `InsufficientData` for fewer than 2 observations.
pub fn annualized_series_return(
    series: &PriceSeries,
    config: &AnalyticsConfig,
) -> AnalyticsResult<AnnualizedReturn> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(f), Some(l)) if series.len() >= 2 => (f, l),
        _ => {
            return Err(AnalyticsError::too_few_observations(
                format!("annualized return for {}", series.ticker()),
                2,
                series.len(),
            ))
        }
    };

    let total = last.value / first.value - 1.0;
    let days = u32::try_from(series.len() - 1).map_err(|_| {
        AnalyticsError::invalid_input(format!("series {} is too long", series.ticker()))
    })?;
    annualize(total, days, config)
}
