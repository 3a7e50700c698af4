//! Real-world conformance tests
//!
//! Scenario tests for the apportionment algorithm, including the bounded
//! rounding-drift case exercised exactly at its edge.

use rust_decimal::Decimal;
use testresult::TestResult;

use rateio::{
    allocation::{Allocation, apportion},
    bill::Bill,
    fixtures,
    occupancy::Roster,
};

fn roster(entries: &[(&str, u32)]) -> Roster {
    entries
        .iter()
        .map(|(id, count)| ((*id).to_owned(), *count))
        .collect()
}

fn drift(allocation: &Allocation) -> Decimal {
    (allocation.total_collected - allocation.grand_total).abs()
}

fn drift_bound(unit_count: usize) -> Decimal {
    Decimal::new(5, 3) * Decimal::from(unit_count)
}

#[test]
fn equal_split_across_equal_units() -> TestResult {
    let bill = Bill::new(
        Decimal::from(10),
        Decimal::from(20),
        Decimal::ZERO,
        Decimal::ZERO,
    );

    let allocation = apportion(&roster(&[("A", 1), ("B", 1)]), &bill);

    assert_eq!(allocation.fixed_share_per_unit, Decimal::from(5));
    assert_eq!(allocation.variable_rate_per_occupant, Decimal::from(10));
    assert_eq!(allocation.shares.get("A").copied(), Some(Decimal::from(15)));
    assert_eq!(allocation.shares.get("B").copied(), Some(Decimal::from(15)));
    assert_eq!(allocation.total_collected, Decimal::from(30));
    assert_eq!(allocation.total_occupants, 2);

    Ok(())
}

#[test]
fn proportional_split_follows_residents() -> TestResult {
    let bill = Bill::new(
        Decimal::from(10),
        Decimal::from(20),
        Decimal::ZERO,
        Decimal::ZERO,
    );

    let allocation = apportion(&roster(&[("A", 1), ("B", 3)]), &bill);

    assert_eq!(allocation.fixed_share_per_unit, Decimal::from(5));
    assert_eq!(allocation.variable_rate_per_occupant, Decimal::from(5));
    assert_eq!(allocation.shares.get("A").copied(), Some(Decimal::from(10)));
    assert_eq!(allocation.shares.get("B").copied(), Some(Decimal::from(20)));
    assert_eq!(allocation.total_collected, Decimal::from(30));

    Ok(())
}

#[test]
fn rounding_drift_stays_within_half_cent_per_unit() -> TestResult {
    let bill = Bill::new(
        Decimal::from(10),
        Decimal::from(10),
        Decimal::ZERO,
        Decimal::ZERO,
    );

    let allocation = apportion(&roster(&[("A", 1), ("B", 1), ("C", 1)]), &bill);

    // 20 / 3 rounds up to 6.67 on every unit, overshooting by one cent.
    for (id, share) in &allocation.shares {
        assert_eq!(*share, Decimal::new(6_67, 2), "unexpected share for {id}");
    }

    assert_eq!(allocation.total_collected, Decimal::new(20_01, 2));
    assert_eq!(allocation.grand_total, Decimal::from(20));
    assert_eq!(drift(&allocation), Decimal::new(1, 2));
    assert!(
        drift(&allocation) <= drift_bound(3),
        "drift exceeds the half-cent-per-unit bound"
    );

    Ok(())
}

#[test]
fn degenerate_empty_roster() {
    let bill = Bill::new(
        Decimal::new(12_34, 2),
        Decimal::new(56_78, 2),
        Decimal::new(9_01, 2),
        Decimal::new(2_30, 2),
    );

    let allocation = apportion(&Roster::default(), &bill);

    assert!(allocation.shares.is_empty(), "no units expected");
    assert_eq!(allocation.total_occupants, 0);
    assert_eq!(allocation.grand_total, Decimal::new(80_43, 2));
}

#[test]
fn conservation_holds_for_the_fixture_building() {
    let roster = fixtures::building();
    let allocation = apportion(&roster, &fixtures::sample_bill());

    assert!(
        drift(&allocation) <= drift_bound(roster.unit_count()),
        "drift {} exceeds bound for {} units",
        drift(&allocation),
        roster.unit_count()
    );
}

#[test]
fn conservation_holds_for_awkward_amounts() {
    let bill = Bill::new(
        Decimal::new(149_99, 2),
        Decimal::new(181_01, 2),
        Decimal::new(24_47, 2),
        Decimal::new(30_53, 2),
    );
    let units = roster(&[("01", 3), ("02", 1), ("101", 4), ("102", 2), ("201", 7)]);

    let allocation = apportion(&units, &bill);

    assert!(
        drift(&allocation) <= drift_bound(units.unit_count()),
        "drift {} exceeds bound",
        drift(&allocation)
    );
}

#[test]
fn more_residents_never_pay_less() -> TestResult {
    let bill = Bill::new(
        Decimal::new(153_27, 2),
        Decimal::new(201_13, 2),
        Decimal::new(24_90, 2),
        Decimal::new(31_75, 2),
    );

    let allocation = apportion(&roster(&[("A", 1), ("B", 2), ("C", 5)]), &bill);

    let a = *allocation.shares.get("A").ok_or("missing unit A")?;
    let b = *allocation.shares.get("B").ok_or("missing unit B")?;
    let c = *allocation.shares.get("C").ok_or("missing unit C")?;

    assert!(a < b, "positive variable rate, strictly increasing shares");
    assert!(b < c, "positive variable rate, strictly increasing shares");

    Ok(())
}
