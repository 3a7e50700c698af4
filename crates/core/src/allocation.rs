//! Allocation
//!
//! The apportionment algorithm. Two passes over the roster: a naive split
//! (fixed component equally per unit, variable component proportionally to
//! residents), then a single correction term folded into the fixed share so
//! the unrounded total reproduces the bill's grand total exactly. Per-unit
//! amounts are rounded to currency precision only after the correction has
//! been applied, so the only drift the result can carry is the final
//! half-cent-per-unit rounding.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{bill::Bill, occupancy::Roster};

/// Result of apportioning one bill across a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    /// Amount owed per unit, rounded to 2 decimal places, ordered by unit id.
    pub shares: BTreeMap<String, Decimal>,

    /// Corrected fixed share, identical for every unit. Kept at full
    /// precision; round only for display.
    pub fixed_share_per_unit: Decimal,

    /// Variable rate per resident, identical for every unit. Kept at full
    /// precision; round only for display.
    pub variable_rate_per_occupant: Decimal,

    /// Sum of the rounded per-unit amounts.
    pub total_collected: Decimal,

    /// Sum of the bill's four components.
    pub grand_total: Decimal,

    /// Total residents across the roster.
    pub total_occupants: u64,
}

/// Apportion a bill across the units of a roster.
///
/// Pure and total: every roster, including an empty one or one with zero
/// residents, produces a well-formed [`Allocation`]. With no units the
/// per-unit mapping is empty and both rates are zero. With units but no
/// residents the variable rate is zero and the entire variable component is
/// absorbed by the correction term, the same way the two resource surcharges
/// always are.
#[must_use]
pub fn apportion(roster: &Roster, bill: &Bill) -> Allocation {
    let grand_total = bill.grand_total();

    if roster.is_empty() {
        return Allocation {
            shares: BTreeMap::new(),
            fixed_share_per_unit: Decimal::ZERO,
            variable_rate_per_occupant: Decimal::ZERO,
            total_collected: Decimal::ZERO,
            grand_total,
            total_occupants: 0,
        };
    }

    let unit_count = Decimal::from(roster.unit_count());
    let total_occupants = roster.total_occupants();

    let naive_fixed_share = bill.fixed() / unit_count;

    let variable_rate = if total_occupants == 0 {
        Decimal::ZERO
    } else {
        bill.variable() / Decimal::from(total_occupants)
    };

    let initial: Decimal = roster
        .iter()
        .map(|(_, occupants)| naive_fixed_share + variable_rate * Decimal::from(occupants))
        .sum();

    // One scalar applied equally to every unit. It carries the two resource
    // surcharges, which the naive shares never distribute, and whatever the
    // naive pass left over.
    let correction = (grand_total - initial) / unit_count;
    let fixed_share_per_unit = naive_fixed_share + correction;

    let shares: BTreeMap<String, Decimal> = roster
        .iter()
        .map(|(id, occupants)| {
            let amount = fixed_share_per_unit + variable_rate * Decimal::from(occupants);

            (id.to_owned(), amount.round_dp(2))
        })
        .collect();

    let total_collected = shares.values().copied().sum();

    Allocation {
        shares,
        fixed_share_per_unit,
        variable_rate_per_occupant: variable_rate,
        total_collected,
        grand_total,
        total_occupants,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn roster(entries: &[(&str, u32)]) -> Roster {
        entries
            .iter()
            .map(|(id, count)| ((*id).to_owned(), *count))
            .collect()
    }

    #[test]
    fn empty_roster_returns_degenerate_allocation() {
        let bill = Bill::new(
            Decimal::from(10),
            Decimal::from(20),
            Decimal::from(5),
            Decimal::from(5),
        );

        let allocation = apportion(&Roster::default(), &bill);

        assert!(allocation.shares.is_empty(), "no units, no shares");
        assert_eq!(allocation.fixed_share_per_unit, Decimal::ZERO);
        assert_eq!(allocation.variable_rate_per_occupant, Decimal::ZERO);
        assert_eq!(allocation.total_collected, Decimal::ZERO);
        assert_eq!(allocation.grand_total, Decimal::from(40));
        assert_eq!(allocation.total_occupants, 0);
    }

    #[test]
    fn zero_occupants_shift_variable_charge_into_correction() -> TestResult {
        let bill = Bill::new(
            Decimal::from(10),
            Decimal::from(20),
            Decimal::ZERO,
            Decimal::ZERO,
        );

        let allocation = apportion(&roster(&[("A", 0), ("B", 0)]), &bill);

        assert_eq!(allocation.variable_rate_per_occupant, Decimal::ZERO);
        assert_eq!(allocation.fixed_share_per_unit, Decimal::from(15));

        let a = *allocation.shares.get("A").ok_or("missing unit A")?;
        let b = *allocation.shares.get("B").ok_or("missing unit B")?;

        assert_eq!(a, Decimal::from(15));
        assert_eq!(b, Decimal::from(15));
        assert_eq!(allocation.total_collected, Decimal::from(30));

        Ok(())
    }

    #[test]
    fn resource_surcharges_are_absorbed_equally() -> TestResult {
        let bill = Bill::new(
            Decimal::from(10),
            Decimal::from(20),
            Decimal::from(6),
            Decimal::from(4),
        );

        let allocation = apportion(&roster(&[("A", 1), ("B", 3)]), &bill);

        // 10 fixed -> 5 each; 20 variable -> 5 per resident; 10 surcharge -> 5 each.
        assert_eq!(allocation.fixed_share_per_unit, Decimal::from(10));
        assert_eq!(allocation.variable_rate_per_occupant, Decimal::from(5));
        assert_eq!(
            allocation.shares.get("A").copied(),
            Some(Decimal::from(15))
        );
        assert_eq!(
            allocation.shares.get("B").copied(),
            Some(Decimal::from(25))
        );
        assert_eq!(allocation.total_collected, allocation.grand_total);

        Ok(())
    }

    #[test]
    fn share_depends_only_on_own_occupants_once_rates_are_fixed() -> TestResult {
        let bill = Bill::new(
            Decimal::from(30),
            Decimal::from(60),
            Decimal::ZERO,
            Decimal::ZERO,
        );

        let allocation = apportion(&roster(&[("A", 2), ("B", 2), ("C", 2)]), &bill);

        let expected =
            allocation.fixed_share_per_unit + allocation.variable_rate_per_occupant * Decimal::TWO;

        for (_, share) in &allocation.shares {
            assert_eq!(*share, expected.round_dp(2), "uniform roster, uniform share");
        }

        Ok(())
    }

    #[test]
    fn apportion_is_idempotent() {
        let bill = Bill::new(
            Decimal::new(153_27, 2),
            Decimal::new(201_13, 2),
            Decimal::new(24_90, 2),
            Decimal::new(31_75, 2),
        );
        let units = roster(&[("101", 2), ("102", 3), ("201", 1)]);

        assert_eq!(apportion(&units, &bill), apportion(&units, &bill));
    }
}
