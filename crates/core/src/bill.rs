//! Bill
//!
//! The four components of one billing period, as they appear on the utility
//! invoice. Amounts are assumed non-negative; the request boundary enforces
//! that before a `Bill` is constructed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One billing period's charge components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    /// Fixed (sewage) component, split equally per unit before correction.
    fixed: Decimal,

    /// Variable (water supply) component, split proportionally to residents.
    variable: Decimal,

    /// Flat water-resources regulatory surcharge.
    water_resource: Decimal,

    /// Flat sewage-resources regulatory surcharge.
    sewage_resource: Decimal,
}

impl Bill {
    /// Create a bill from its four components.
    #[must_use]
    pub fn new(
        fixed: Decimal,
        variable: Decimal,
        water_resource: Decimal,
        sewage_resource: Decimal,
    ) -> Self {
        Self {
            fixed,
            variable,
            water_resource,
            sewage_resource,
        }
    }

    /// Fixed component.
    #[must_use]
    pub fn fixed(&self) -> Decimal {
        self.fixed
    }

    /// Variable component.
    #[must_use]
    pub fn variable(&self) -> Decimal {
        self.variable
    }

    /// Water-resources surcharge.
    #[must_use]
    pub fn water_resource(&self) -> Decimal {
        self.water_resource
    }

    /// Sewage-resources surcharge.
    #[must_use]
    pub fn sewage_resource(&self) -> Decimal {
        self.sewage_resource
    }

    /// Sum of all four components: the amount the building must collect.
    #[must_use]
    pub fn grand_total(&self) -> Decimal {
        self.fixed + self.variable + self.water_resource + self.sewage_resource
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grand_total_sums_all_components() {
        let bill = Bill::new(
            Decimal::new(150_00, 2),
            Decimal::new(180_50, 2),
            Decimal::new(25_00, 2),
            Decimal::new(30_00, 2),
        );

        assert_eq!(bill.grand_total(), Decimal::new(385_50, 2));
    }

    #[test]
    fn zero_bill_has_zero_total() {
        let bill = Bill::new(
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        );

        assert_eq!(bill.grand_total(), Decimal::ZERO);
    }
}
