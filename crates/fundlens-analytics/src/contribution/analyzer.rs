//! Per-holding price impact and contribution to fund return.

use std::cmp::Ordering;

use fundlens_core::{AnalyticsError, AnalyticsResult, Date, Holding};
use serde::Serialize;
use tracing::{debug, warn};

/// How a report converts price moves into money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionMode {
    /// `impact = (end - start) × shares_held`.
    Shares,
    /// `impact = weight × price_change_pct × fund_value`.
    Weight,
}

impl std::fmt::Display for ContributionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shares => f.write_str("shares"),
            Self::Weight => f.write_str("weight"),
        }
    }
}

/// Price move of one instrument over a window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceMove {
    /// Instrument ticker.
    pub ticker: String,
    /// Date of the starting price.
    pub start_date: Date,
    /// Starting price.
    pub start_price: f64,
    /// Date of the ending price.
    pub end_date: Date,
    /// Ending price.
    pub end_price: f64,
    /// Fractional change over the window.
    pub change_pct: f64,
}

impl PriceMove {
    /// Creates a move from two prices.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if either price is not positive and finite.
    pub fn new(
        ticker: impl Into<String>,
        start_date: Date,
        start_price: f64,
        end_date: Date,
        end_price: f64,
    ) -> AnalyticsResult<Self> {
        let ticker = ticker.into();
        for price in [start_price, end_price] {
            if !price.is_finite() || price <= 0.0 {
                return Err(AnalyticsError::invalid_input(format!(
                    "price move for {ticker} needs positive prices, got {price}"
                )));
            }
        }
        Ok(Self {
            ticker,
            start_date,
            start_price,
            end_date,
            end_price,
            change_pct: (end_price - start_price) / start_price,
        })
    }

    /// Absolute price change.
    #[must_use]
    pub fn price_change(&self) -> f64 {
        self.end_price - self.start_price
    }
}

/// Contribution of one holding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionRecord {
    /// Instrument ticker.
    pub ticker: String,
    /// Sector classification.
    pub sector: String,
    /// Price at the start of the window.
    pub start_price: f64,
    /// Price at the end of the window.
    pub end_price: f64,
    /// Absolute price change.
    pub price_change: f64,
    /// Fractional price change.
    pub price_change_pct: f64,
    /// Portfolio weight. In shares mode this is the holding's share of the
    /// total value at the window start.
    pub weight: Option<f64>,
    /// Shares held, if known.
    pub shares_held: Option<f64>,
    /// Mode used for this record.
    pub mode: ContributionMode,
    /// Money impact on the fund.
    pub price_impact: f64,
    /// `price_impact / total_value` (fraction).
    pub contribution_pct: f64,
}

/// A holding left out of a report, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExcludedHolding {
    /// Instrument ticker.
    pub ticker: String,
    /// Why it was excluded.
    pub reason: String,
}

/// Contribution of every resolvable holding over one window.
///
/// Records are held in descending contribution order. Holdings that could
/// not be evaluated are listed by cause and never zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionReport {
    /// Window label, such as `1D` or `since 2025-01-01`.
    pub label: String,
    /// Mode shared by all records; `None` if no record was produced.
    pub mode: Option<ContributionMode>,
    /// Denominator of `contribution_pct`.
    pub total_value: f64,
    /// Contribution records, highest first.
    pub records: Vec<ContributionRecord>,
    /// Holdings with neither shares nor weight.
    pub unresolvable: Vec<String>,
    /// Holdings without price data.
    pub not_found: Vec<String>,
    /// Holdings whose window could not be resolved.
    pub insufficient: Vec<ExcludedHolding>,
}

/// Totals over a report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContributionSummary {
    /// Sum of price impacts.
    pub total_impact: f64,
    /// Sum of contributions (fraction).
    pub total_contribution: f64,
    /// Mean contribution per record (0 when there are none).
    pub average_contribution: f64,
    /// Records with positive contribution.
    pub positive_count: usize,
    /// Records with negative contribution.
    pub negative_count: usize,
    /// Number of records.
    pub holding_count: usize,
}

fn descending(a: &ContributionRecord, b: &ContributionRecord) -> Ordering {
    b.contribution_pct
        .total_cmp(&a.contribution_pct)
        .then_with(|| a.ticker.cmp(&b.ticker))
}

fn ascending(a: &ContributionRecord, b: &ContributionRecord) -> Ordering {
    a.contribution_pct
        .total_cmp(&b.contribution_pct)
        .then_with(|| a.ticker.cmp(&b.ticker))
}

impl ContributionReport {
    /// The `n` largest contributors, ties broken by ticker.
    #[must_use]
    pub fn top_contributors(&self, n: usize) -> Vec<&ContributionRecord> {
        let mut sorted: Vec<&ContributionRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| descending(a, b));
        sorted.truncate(n);
        sorted
    }

    /// The `n` smallest contributors, ties broken by ticker.
    #[must_use]
    pub fn bottom_contributors(&self, n: usize) -> Vec<&ContributionRecord> {
        let mut sorted: Vec<&ContributionRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| ascending(a, b));
        sorted.truncate(n);
        sorted
    }

    /// Finds the record for `ticker`.
    #[must_use]
    pub fn record(&self, ticker: &str) -> Option<&ContributionRecord> {
        self.records.iter().find(|r| r.ticker == ticker)
    }

    /// Totals over all records.
    #[must_use]
    pub fn summary(&self) -> ContributionSummary {
        let total_impact: f64 = self.records.iter().map(|r| r.price_impact).sum();
        let total_contribution: f64 = self.records.iter().map(|r| r.contribution_pct).sum();
        let holding_count = self.records.len();
        let average_contribution = if holding_count == 0 {
            0.0
        } else {
            total_contribution / holding_count as f64
        };

        ContributionSummary {
            total_impact,
            total_contribution,
            average_contribution,
            positive_count: self
                .records
                .iter()
                .filter(|r| r.contribution_pct > 0.0)
                .count(),
            negative_count: self
                .records
                .iter()
                .filter(|r| r.contribution_pct < 0.0)
                .count(),
            holding_count,
        }
    }
}

/// Contribution from explicit price moves.
///
/// A holding whose ticker has no entry in `moves` is listed in `not_found`.
/// See [`ContributionMode`] for the formulas. `fund_value` is optional in
/// shares mode (defaulting to `Σ start_price × shares`) and required in
/// weight mode.
///
/// # Errors
///
/// - `AmbiguousInput` if the evaluated holdings mix shares and weights
/// - `InvalidInput` if weight mode lacks a fund value, or the total value
///   is not positive
pub fn contribution_report(
    label: impl Into<String>,
    holdings: &[Holding],
    moves: &[PriceMove],
    fund_value: Option<f64>,
) -> AnalyticsResult<ContributionReport> {
    let entries = holdings
        .iter()
        .map(|h| {
            let lookup = h.is_resolvable().then(|| {
                moves
                    .iter()
                    .find(|m| m.ticker == h.ticker)
                    .cloned()
                    .ok_or_else(|| AnalyticsError::not_found(&h.ticker))
            });
            (h, lookup)
        })
        .collect();
    assemble(label.into(), entries, fund_value)
}

/// A holding paired with its move lookup; `None` marks an unresolvable holding.
pub(crate) type MoveEntry<'a> = (&'a Holding, Option<AnalyticsResult<PriceMove>>);

pub(crate) fn assemble(
    label: String,
    entries: Vec<MoveEntry<'_>>,
    fund_value: Option<f64>,
) -> AnalyticsResult<ContributionReport> {
    let mut unresolvable = Vec::new();
    let mut not_found = Vec::new();
    let mut insufficient = Vec::new();
    let mut priced: Vec<(&Holding, PriceMove)> = Vec::new();

    for (holding, lookup) in entries {
        match lookup {
            None => {
                warn!(ticker = %holding.ticker, "holding has neither shares nor weight");
                unresolvable.push(holding.ticker.clone());
            }
            Some(Err(AnalyticsError::NotFound { .. })) => {
                warn!(ticker = %holding.ticker, "no price data for holding");
                not_found.push(holding.ticker.clone());
            }
            Some(Err(err)) => {
                warn!(ticker = %holding.ticker, error = %err, "window unresolved for holding");
                insufficient.push(ExcludedHolding {
                    ticker: holding.ticker.clone(),
                    reason: err.to_string(),
                });
            }
            Some(Ok(mv)) => priced.push((holding, mv)),
        }
    }

    let mode = resolve_mode(&priced)?;
    let mut records = Vec::with_capacity(priced.len());
    let mut total_value = 0.0;

    if let Some(mode) = mode {
        total_value = resolve_total_value(mode, &priced, fund_value)?;
        for (holding, mv) in &priced {
            records.push(record(holding, mv, mode, total_value));
        }
        records.sort_by(descending);
    }

    debug!(
        label = %label,
        records = records.len(),
        unresolvable = unresolvable.len(),
        not_found = not_found.len(),
        insufficient = insufficient.len(),
        "contribution report"
    );

    Ok(ContributionReport {
        label,
        mode,
        total_value,
        records,
        unresolvable,
        not_found,
        insufficient,
    })
}

fn resolve_mode(priced: &[(&Holding, PriceMove)]) -> AnalyticsResult<Option<ContributionMode>> {
    if priced.is_empty() {
        return Ok(None);
    }
    if priced.iter().all(|(h, _)| h.has_shares()) {
        return Ok(Some(ContributionMode::Shares));
    }
    if priced.iter().all(|(h, _)| h.has_weight()) {
        return Ok(Some(ContributionMode::Weight));
    }

    let shares_only: Vec<&str> = priced
        .iter()
        .filter(|(h, _)| !h.has_weight())
        .map(|(h, _)| h.ticker.as_str())
        .collect();
    let weight_only: Vec<&str> = priced
        .iter()
        .filter(|(h, _)| !h.has_shares())
        .map(|(h, _)| h.ticker.as_str())
        .collect();
    Err(AnalyticsError::ambiguous_input(format!(
        "holdings mix shares ({}) and weights ({}) in one report",
        shares_only.join(", "),
        weight_only.join(", ")
    )))
}

fn resolve_total_value(
    mode: ContributionMode,
    priced: &[(&Holding, PriceMove)],
    fund_value: Option<f64>,
) -> AnalyticsResult<f64> {
    let total = match (mode, fund_value) {
        (_, Some(v)) => v,
        (ContributionMode::Shares, None) => priced
            .iter()
            .filter_map(|(h, mv)| h.market_value(mv.start_price))
            .sum(),
        (ContributionMode::Weight, None) => {
            return Err(AnalyticsError::invalid_input(
                "weight-based contribution needs a fund value",
            ))
        }
    };

    if !total.is_finite() || total <= 0.0 {
        return Err(AnalyticsError::invalid_input(format!(
            "total portfolio value must be positive, got {total}"
        )));
    }
    Ok(total)
}

fn record(
    holding: &Holding,
    mv: &PriceMove,
    mode: ContributionMode,
    total_value: f64,
) -> ContributionRecord {
    let (weight, price_impact) = match mode {
        ContributionMode::Shares => {
            let shares = holding.shares_held.unwrap_or_default();
            (
                Some(mv.start_price * shares / total_value),
                mv.price_change() * shares,
            )
        }
        ContributionMode::Weight => (
            holding.weight,
            holding.weight.unwrap_or_default() * mv.change_pct * total_value,
        ),
    };

    ContributionRecord {
        ticker: holding.ticker.clone(),
        sector: holding.sector.clone(),
        start_price: mv.start_price,
        end_price: mv.end_price,
        price_change: mv.price_change(),
        price_change_pct: mv.change_pct,
        weight,
        shares_held: holding.shares_held,
        mode,
        price_impact,
        contribution_pct: price_impact / total_value,
    }
}
