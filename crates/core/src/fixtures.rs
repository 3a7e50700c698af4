//! Test fixtures
//!
//! The canonical eight-apartment building and a representative bill, shared
//! by the examples and the conformance tests.

use rust_decimal::Decimal;

use crate::{bill::Bill, occupancy::Roster};

/// The canonical building: eight apartments, seventeen residents.
#[must_use]
pub fn building() -> Roster {
    [
        ("apartamento 01", 3),
        ("apartamento 02", 3),
        ("apartamento 101", 2),
        ("apartamento 102", 2),
        ("apartamento 201", 2),
        ("apartamento 202", 2),
        ("apartamento 301", 1),
        ("apartamento 302", 2),
    ]
    .into_iter()
    .map(|(id, count)| (id.to_owned(), count))
    .collect()
}

/// A representative monthly bill for [`building`].
#[must_use]
pub fn sample_bill() -> Bill {
    Bill::new(
        Decimal::new(150_00, 2),
        Decimal::new(180_50, 2),
        Decimal::new(25_00, 2),
        Decimal::new(30_00, 2),
    )
}
