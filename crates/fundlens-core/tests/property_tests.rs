//! Property-based tests for series lookup invariants.
//!
//! - Nearest-before lookup never returns a point after the requested date
//! - Lookup never interpolates: the returned value is one of the inputs
//! - Construction rejects any unsorted input

use fundlens_core::prelude::*;
use proptest::prelude::*;

// =============================================================================
// GENERATORS
// =============================================================================

fn base_date() -> Date {
    Date::from_ymd(2024, 1, 2).unwrap()
}

/// Strictly increasing dates built from positive gaps, with positive prices.
fn price_points() -> impl Strategy<Value = Vec<(Date, f64)>> {
    prop::collection::vec((1i64..6, 1.0f64..500.0), 1..60).prop_map(|steps| {
        let mut date = base_date();
        steps
            .into_iter()
            .map(|(gap, price)| {
                date = date.add_days(gap);
                (date, price)
            })
            .collect()
    })
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_lookup_is_on_or_before(points in price_points(), offset in 0i64..400) {
        let series = PriceSeries::new("T", points.clone()).unwrap();
        let query = base_date().add_days(offset);

        match series.price_on_or_before(query) {
            Some(obs) => {
                prop_assert!(obs.date <= query);
                prop_assert!(points.iter().any(|&(d, p)| d == obs.date && p == obs.value));
                // no later point also satisfies the bound
                prop_assert!(!points.iter().any(|&(d, _)| d > obs.date && d <= query));
            }
            None => prop_assert!(points[0].0 > query),
        }
    }

    #[test]
    fn prop_reversed_input_rejected(points in price_points()) {
        prop_assume!(points.len() >= 2);
        let mut reversed = points;
        reversed.reverse();
        prop_assert!(PriceSeries::new("T", reversed).is_err());
    }
}

#[test]
fn test_snapshot_round_trip_through_builder() {
    let d1 = Date::from_ymd(2025, 1, 2).unwrap();
    let d2 = Date::from_ymd(2025, 1, 3).unwrap();

    let snapshot = FundSnapshot::builder()
        .name("Balanced")
        .as_of_date(d2)
        .nav_series(PriceSeries::new("Balanced", vec![(d1, 100.0), (d2, 101.0)]).unwrap())
        .add_holding(Holding::new("AAA").with_shares(10.0).with_sector("Energy"))
        .add_price_series(PriceSeries::new("AAA", vec![(d1, 5.0), (d2, 5.5)]).unwrap())
        .build()
        .unwrap();

    assert_eq!(snapshot.as_of_date(), d2);
    assert_eq!(snapshot.price_series("AAA").unwrap().len(), 2);
    assert_eq!(
        snapshot.id(),
        SnapshotId {
            name: "Balanced".to_string(),
            as_of: d2
        }
    );
}
