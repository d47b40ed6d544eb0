//! Large price movers.

use fundlens_core::{AnalyticsError, AnalyticsResult};
use serde::Serialize;

use super::analyzer::{ContributionRecord, ContributionReport};

/// Holdings whose price moved at least the threshold either way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LargeMovers {
    /// Absolute threshold (fraction).
    pub threshold: f64,
    /// Rises, largest first.
    pub gainers: Vec<ContributionRecord>,
    /// Falls, largest fall first.
    pub decliners: Vec<ContributionRecord>,
}

impl LargeMovers {
    /// Returns true if nothing crossed the threshold.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gainers.is_empty() && self.decliners.is_empty()
    }
}

/// Splits out records with `|price_change_pct| >= threshold`.
///
/// # Errors
///
/// Returns `InvalidInput` for a negative or non-finite threshold.
pub fn large_movers(report: &ContributionReport, threshold: f64) -> AnalyticsResult<LargeMovers> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(AnalyticsError::invalid_input(format!(
            "large-move threshold must be non-negative, got {threshold}"
        )));
    }

    let mut gainers: Vec<ContributionRecord> = report
        .records
        .iter()
        .filter(|r| r.price_change_pct >= threshold && r.price_change_pct > 0.0)
        .cloned()
        .collect();
    let mut decliners: Vec<ContributionRecord> = report
        .records
        .iter()
        .filter(|r| r.price_change_pct <= -threshold && r.price_change_pct < 0.0)
        .cloned()
        .collect();

    gainers.sort_by(|a, b| {
        b.price_change_pct
            .total_cmp(&a.price_change_pct)
            .then_with(|| a.ticker.cmp(&b.ticker))
    });
    decliners.sort_by(|a, b| {
        a.price_change_pct
            .total_cmp(&b.price_change_pct)
            .then_with(|| a.ticker.cmp(&b.ticker))
    });

    Ok(LargeMovers {
        threshold,
        gainers,
        decliners,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contribution::{contribution_report, PriceMove};
    use fundlens_core::{Date, Holding};

    fn report(changes: &[(&str, f64)]) -> ContributionReport {
        let d1 = Date::from_ymd(2025, 5, 1).unwrap();
        let d2 = Date::from_ymd(2025, 5, 2).unwrap();
        let holdings: Vec<Holding> = changes
            .iter()
            .map(|(t, _)| Holding::new(*t).with_shares(1.0))
            .collect();
        let moves: Vec<PriceMove> = changes
            .iter()
            .map(|(t, end)| PriceMove::new(*t, d1, 100.0, d2, *end).unwrap())
            .collect();
        contribution_report("1D", &holdings, &moves, None).unwrap()
    }

    #[test]
    fn test_split_and_sort() {
        let r = report(&[("A", 101.0), ("B", 103.0), ("C", 95.0), ("D", 98.0), ("E", 106.0)]);
        let movers = large_movers(&r, 0.02).unwrap();

        let up: Vec<&str> = movers.gainers.iter().map(|m| m.ticker.as_str()).collect();
        let down: Vec<&str> = movers.decliners.iter().map(|m| m.ticker.as_str()).collect();
        assert_eq!(up, vec!["E", "B"]);
        // D is exactly -2%
        assert_eq!(down, vec!["C", "D"]);
    }

    #[test]
    fn test_zero_threshold_skips_flat() {
        let r = report(&[("A", 100.0), ("B", 100.5)]);
        let movers = large_movers(&r, 0.0).unwrap();
        assert_eq!(movers.gainers.len(), 1);
        assert!(movers.decliners.is_empty());
    }

    #[test]
    fn test_nothing_crosses() {
        let r = report(&[("A", 100.5)]);
        assert!(large_movers(&r, 0.02).unwrap().is_empty());
        assert!(large_movers(&r, -0.1).is_err());
    }
}
