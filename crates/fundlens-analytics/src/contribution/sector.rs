//! Sector aggregation of contributions, and sector allocation by weight,
//! market value or holding count.

use std::collections::BTreeMap;

use fundlens_core::{FundSnapshot, Holding};
use serde::Serialize;

use super::analyzer::ContributionReport;
use crate::config::AnalyticsConfig;

/// Aggregated contribution for one sector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorContribution {
    /// Sector name.
    pub sector: String,
    /// Number of holdings in the sector.
    pub holding_count: usize,
    /// Sum of price impacts.
    pub price_impact: f64,
    /// Sum of contributions (fraction).
    pub contribution_pct: f64,
}

/// Per-sector sums over a report, highest contribution first.
#[must_use]
pub fn sector_contributions(report: &ContributionReport) -> Vec<SectorContribution> {
    let mut by_sector: BTreeMap<&str, SectorContribution> = BTreeMap::new();

    for record in &report.records {
        let entry = by_sector
            .entry(record.sector.as_str())
            .or_insert_with(|| SectorContribution {
                sector: record.sector.clone(),
                holding_count: 0,
                price_impact: 0.0,
                contribution_pct: 0.0,
            });
        entry.holding_count += 1;
        entry.price_impact += record.price_impact;
        entry.contribution_pct += record.contribution_pct;
    }

    let mut sectors: Vec<SectorContribution> = by_sector.into_values().collect();
    sectors.sort_by(|a, b| {
        b.contribution_pct
            .total_cmp(&a.contribution_pct)
            .then_with(|| a.sector.cmp(&b.sector))
    });
    sectors
}

/// What a sector allocation measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationBasis {
    /// Sum of the holdings' stated weights.
    Weight,
    /// Sum of `shares × latest price`, as a share of the total.
    MarketValue,
    /// Number of holdings, as a share of all holdings.
    Count,
}

impl std::fmt::Display for AllocationBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weight => f.write_str("weight"),
            Self::MarketValue => f.write_str("market value"),
            Self::Count => f.write_str("holding count"),
        }
    }
}

/// Share of the fund held in one sector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorWeight {
    /// Sector name.
    pub sector: String,
    /// Number of allocated holdings in the sector.
    pub holding_count: usize,
    /// Summed weight, market value or holding count.
    pub amount: f64,
    /// Fraction of the fund (the summed weight for the weight basis).
    pub weight: f64,
}

/// Sector breakdown of a holdings list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorAllocation {
    /// What `amount` and `weight` measure.
    pub basis: AllocationBasis,
    /// Sectors by descending weight.
    pub sectors: Vec<SectorWeight>,
    /// Holdings the basis cannot measure, left out of `sectors`.
    pub excluded: Vec<String>,
}

impl SectorAllocation {
    /// Sum of all sector weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.sectors.iter().map(|s| s.weight).sum()
    }

    /// Sum of all sector amounts.
    #[must_use]
    pub fn total_amount(&self) -> f64 {
        self.sectors.iter().map(|s| s.amount).sum()
    }

    /// Returns the entry for `sector`.
    #[must_use]
    pub fn sector(&self, sector: &str) -> Option<&SectorWeight> {
        self.sectors.iter().find(|s| s.sector == sector)
    }
}

fn allocate<'a>(
    basis: AllocationBasis,
    measured: impl IntoIterator<Item = (&'a Holding, Option<f64>)>,
) -> SectorAllocation {
    let mut by_sector: BTreeMap<&str, SectorWeight> = BTreeMap::new();
    let mut excluded = Vec::new();

    for (holding, amount) in measured {
        let Some(amount) = amount else {
            excluded.push(holding.ticker.clone());
            continue;
        };
        let entry = by_sector
            .entry(holding.sector.as_str())
            .or_insert_with(|| SectorWeight {
                sector: holding.sector.clone(),
                holding_count: 0,
                amount: 0.0,
                weight: 0.0,
            });
        entry.holding_count += 1;
        entry.amount += amount;
    }

    let total: f64 = by_sector.values().map(|s| s.amount).sum();
    let mut sectors: Vec<SectorWeight> = by_sector
        .into_values()
        .map(|mut s| {
            s.weight = match basis {
                AllocationBasis::Weight => s.amount,
                _ if total > 0.0 => s.amount / total,
                _ => 0.0,
            };
            s
        })
        .collect();
    sectors.sort_by(|a, b| {
        b.weight
            .total_cmp(&a.weight)
            .then_with(|| a.sector.cmp(&b.sector))
    });

    SectorAllocation {
        basis,
        sectors,
        excluded,
    }
}

/// Stated weight per sector, highest first. Holdings without a weight are
/// excluded.
#[must_use]
pub fn sector_allocation(holdings: &[Holding]) -> SectorAllocation {
    allocate(
        AllocationBasis::Weight,
        holdings.iter().map(|h| (h, h.weight)),
    )
}

/// Share of holdings per sector, highest first.
#[must_use]
pub fn sector_allocation_by_count(holdings: &[Holding]) -> SectorAllocation {
    allocate(AllocationBasis::Count, holdings.iter().map(|h| (h, Some(1.0))))
}

/// Market value per sector at the snapshot's as-of date, highest first.
///
/// Each holding is valued at `shares × price`, using its latest price on or
/// before the as-of date. Holdings without shares, or without a price within
/// `config.lookback_tolerance_days`, are excluded.
#[must_use]
pub fn sector_allocation_by_value(
    snapshot: &FundSnapshot,
    config: &AnalyticsConfig,
) -> SectorAllocation {
    let as_of = snapshot.as_of_date();
    let tolerance = i64::from(config.lookback_tolerance_days);

    allocate(
        AllocationBasis::MarketValue,
        snapshot.holdings().iter().map(|h| {
            let price = snapshot
                .price_series(&h.ticker)
                .ok()
                .and_then(|s| s.price_on_or_before(as_of))
                .filter(|o| o.date.days_between(&as_of) <= tolerance);
            (h, price.and_then(|o| h.market_value(o.value)))
        }),
    )
}

/// Allocation on the best basis the holdings support.
///
/// Stated weights when every holding has one, otherwise market value when any
/// holding can be valued, otherwise holding count.
#[must_use]
pub fn preferred_sector_allocation(
    snapshot: &FundSnapshot,
    config: &AnalyticsConfig,
) -> SectorAllocation {
    let holdings = snapshot.holdings();
    if !holdings.is_empty() && holdings.iter().all(Holding::has_weight) {
        return sector_allocation(holdings);
    }
    let by_value = sector_allocation_by_value(snapshot, config);
    if by_value.sectors.is_empty() {
        sector_allocation_by_count(holdings)
    } else {
        by_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contribution::{contribution_report, PriceMove};
    use approx::assert_relative_eq;
    use fundlens_core::{Date, PriceSeries};

    fn holdings() -> Vec<Holding> {
        vec![
            Holding::new("A").with_weight(0.3).with_sector("Tech"),
            Holding::new("B").with_weight(0.2).with_sector("Tech"),
            Holding::new("C").with_weight(0.5).with_sector("Energy"),
        ]
    }

    #[test]
    fn test_sector_contributions() {
        let d1 = Date::from_ymd(2025, 5, 1).unwrap();
        let d2 = Date::from_ymd(2025, 5, 2).unwrap();
        let moves = vec![
            PriceMove::new("A", d1, 10.0, d2, 11.0).unwrap(),
            PriceMove::new("B", d1, 10.0, d2, 10.5).unwrap(),
            PriceMove::new("C", d1, 10.0, d2, 9.0).unwrap(),
        ];
        let report = contribution_report("1D", &holdings(), &moves, Some(1000.0)).unwrap();
        let sectors = sector_contributions(&report);

        assert_eq!(sectors.len(), 2);
        assert_eq!(sectors[0].sector, "Tech");
        assert_eq!(sectors[0].holding_count, 2);
        // 0.3*0.1 + 0.2*0.05
        assert_relative_eq!(sectors[0].contribution_pct, 0.04, epsilon = 1e-12);
        assert_relative_eq!(sectors[0].price_impact, 40.0, epsilon = 1e-9);
        assert_relative_eq!(sectors[1].contribution_pct, -0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_sector_allocation() {
        let mut h = holdings();
        h.push(Holding::new("D").with_shares(5.0).with_sector("Tech"));
        let alloc = sector_allocation(&h);

        assert_eq!(alloc.sectors[0].sector, "Energy");
        assert_relative_eq!(alloc.sectors[0].weight, 0.5);
        assert_eq!(alloc.sectors[1].sector, "Tech");
        assert_eq!(alloc.sectors[1].holding_count, 2);
        assert_eq!(alloc.basis, AllocationBasis::Weight);
        assert_eq!(alloc.excluded, vec!["D".to_string()]);
        assert_relative_eq!(alloc.total_weight(), 1.0, epsilon = 1e-12);
    }

    // =========================================================================
    // Shares-only holdings
    // =========================================================================

    fn shares_only_snapshot() -> FundSnapshot {
        let d1 = Date::from_ymd(2025, 5, 1).unwrap();
        let d2 = Date::from_ymd(2025, 5, 2).unwrap();
        let series = |t: &str, p1: f64, p2: f64| PriceSeries::new(t, vec![(d1, p1), (d2, p2)]).unwrap();

        FundSnapshot::builder()
            .name("Fund")
            .as_of_date(d2)
            .nav_series(series("Fund", 10.0, 10.1))
            .add_holding(Holding::new("A").with_shares(10.0).with_sector("Tech"))
            .add_holding(Holding::new("B").with_shares(5.0).with_sector("Tech"))
            .add_holding(Holding::new("C").with_shares(20.0).with_sector("Energy"))
            .add_holding(Holding::new("D").with_shares(1.0).with_sector("Energy"))
            .add_price_series(series("A", 9.0, 10.0))
            .add_price_series(series("B", 21.0, 20.0))
            .add_price_series(series("C", 4.0, 5.0))
            .build()
            .unwrap()
    }

    #[test]
    fn test_shares_only_weight_allocation_is_empty() {
        let snapshot = shares_only_snapshot();
        let alloc = sector_allocation(snapshot.holdings());
        assert!(alloc.sectors.is_empty());
        assert_eq!(alloc.excluded.len(), 4);
    }

    #[test]
    fn test_allocation_by_count() {
        let snapshot = shares_only_snapshot();
        let alloc = sector_allocation_by_count(snapshot.holdings());

        assert_eq!(alloc.basis, AllocationBasis::Count);
        assert!(alloc.excluded.is_empty());
        // two each: ties break by name
        assert_eq!(alloc.sectors[0].sector, "Energy");
        assert_relative_eq!(alloc.sectors[0].weight, 0.5);
        assert_relative_eq!(alloc.sector("Tech").unwrap().amount, 2.0);
    }

    #[test]
    fn test_allocation_by_market_value() {
        let snapshot = shares_only_snapshot();
        let alloc = sector_allocation_by_value(&snapshot, &AnalyticsConfig::default());

        assert_eq!(alloc.basis, AllocationBasis::MarketValue);
        // Tech 10*10 + 5*20 = 200, Energy 20*5 = 100; D has no prices
        assert_eq!(alloc.sectors[0].sector, "Tech");
        assert_relative_eq!(alloc.sectors[0].amount, 200.0, epsilon = 1e-9);
        assert_relative_eq!(alloc.sectors[0].weight, 2.0 / 3.0, epsilon = 1e-12);
        assert_eq!(alloc.sector("Energy").unwrap().holding_count, 1);
        assert_relative_eq!(alloc.total_amount(), 300.0, epsilon = 1e-9);
        assert_eq!(alloc.excluded, vec!["D".to_string()]);
    }

    #[test]
    fn test_allocation_by_value_skips_stale_prices() {
        let snapshot = shares_only_snapshot();
        let strict = AnalyticsConfig::default().with_lookback_tolerance_days(0);
        assert_eq!(sector_allocation_by_value(&snapshot, &strict).sectors.len(), 2);

        let d1 = Date::from_ymd(2025, 5, 1).unwrap();
        let late = FundSnapshot::builder()
            .name("Fund")
            .as_of_date(Date::from_ymd(2025, 5, 30).unwrap())
            .nav_series(PriceSeries::new("Fund", vec![(d1, 10.0)]).unwrap())
            .add_holding(Holding::new("A").with_shares(10.0).with_sector("Tech"))
            .add_price_series(PriceSeries::new("A", vec![(d1, 9.0)]).unwrap())
            .build()
            .unwrap();
        let alloc = sector_allocation_by_value(&late, &AnalyticsConfig::default());
        assert!(alloc.sectors.is_empty());
        assert_eq!(alloc.excluded, vec!["A".to_string()]);
    }

    #[test]
    fn test_preferred_allocation() {
        let config = AnalyticsConfig::default();
        let snapshot = shares_only_snapshot();
        assert_eq!(
            preferred_sector_allocation(&snapshot, &config).basis,
            AllocationBasis::MarketValue
        );

        let d1 = Date::from_ymd(2025, 5, 1).unwrap();
        let weighted = FundSnapshot::builder()
            .name("Fund")
            .as_of_date(d1)
            .nav_series(PriceSeries::new("Fund", vec![(d1, 10.0)]).unwrap())
            .holdings(holdings())
            .build()
            .unwrap();
        assert_eq!(
            preferred_sector_allocation(&weighted, &config).basis,
            AllocationBasis::Weight
        );

        let unpriced = FundSnapshot::builder()
            .name("Fund")
            .as_of_date(d1)
            .nav_series(PriceSeries::new("Fund", vec![(d1, 10.0)]).unwrap())
            .add_holding(Holding::new("X").with_shares(1.0).with_sector("Tech"))
            .build()
            .unwrap();
        let alloc = preferred_sector_allocation(&unpriced, &config);
        assert_eq!(alloc.basis, AllocationBasis::Count);
        assert_relative_eq!(alloc.sectors[0].weight, 1.0);
    }

    #[test]
    fn test_equal_weights_sorted_by_name() {
        let h = vec![
            Holding::new("X").with_weight(0.5).with_sector("Utilities"),
            Holding::new("Y").with_weight(0.5).with_sector("Materials"),
        ];
        let alloc = sector_allocation(&h);
        assert_eq!(alloc.sectors[0].sector, "Materials");
    }
}
