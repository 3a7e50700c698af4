//! Allocation request payload
//!
//! The wire contract predates this service, so field names follow the
//! original API (`valor_fixo`, `distribuicao_residentes`, ...) while the Rust
//! side keeps its own names.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use tracing::warn;

use rateio::{
    bill::Bill,
    occupancy::{RawCount, RejectedUnit, Roster},
};

/// A resident count as it arrives on the wire: a number or a digit string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum ResidentCount {
    /// Whole number, e.g. `3`.
    Count(i64),

    /// Fractional number; dropped by normalization unless integral.
    Number(f64),

    /// Digit string, e.g. `"3"` (the dashboard posts text inputs).
    Text(String),
}

impl From<ResidentCount> for RawCount {
    fn from(count: ResidentCount) -> Self {
        match count {
            ResidentCount::Count(value) => Self::Count(value),
            ResidentCount::Number(value) => Self::Number(value),
            ResidentCount::Text(value) => Self::Text(value),
        }
    }
}

/// Request body for the allocation endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AllocationRequest {
    /// Residents per unit.
    #[serde(rename = "distribuicao_residentes")]
    pub residents: BTreeMap<String, ResidentCount>,

    /// Fixed (sewage) component.
    #[serde(rename = "valor_fixo")]
    pub fixed_charge: f64,

    /// Variable (water supply) component.
    #[serde(rename = "valor_variavel")]
    pub variable_charge: f64,

    /// Water-resources regulatory surcharge.
    #[serde(rename = "recursos_hidr_agua")]
    pub water_resource_charge: f64,

    /// Sewage-resources regulatory surcharge.
    #[serde(rename = "recursos_hidr_esg")]
    pub sewage_resource_charge: f64,
}

impl AllocationRequest {
    /// Validate the monetary fields and build the bill.
    ///
    /// The core assumes non-negative amounts, so negatives are rejected here
    /// at the boundary with a client error.
    pub(crate) fn bill(&self) -> Result<Bill, StatusError> {
        Ok(Bill::new(
            money_component("valor_fixo", self.fixed_charge)?,
            money_component("valor_variavel", self.variable_charge)?,
            money_component("recursos_hidr_agua", self.water_resource_charge)?,
            money_component("recursos_hidr_esg", self.sewage_resource_charge)?,
        ))
    }

    /// Normalize the per-unit resident counts, dropping invalid entries.
    pub(crate) fn roster(self) -> (Roster, Vec<RejectedUnit>) {
        let (roster, rejected) = Roster::normalize(
            self.residents
                .into_iter()
                .map(|(id, count)| (id, count.into())),
        );

        (roster, rejected.into_vec())
    }
}

fn money_component(name: &str, value: f64) -> Result<Decimal, StatusError> {
    if value < 0.0 {
        return Err(
            StatusError::bad_request().brief(format!("{name} must be a non-negative amount"))
        );
    }

    Decimal::from_f64_retain(value)
        .ok_or_else(|| StatusError::bad_request().brief(format!("{name} is not a usable amount")))
}

/// Log the units dropped during normalization.
pub(crate) fn warn_dropped(rejected: &[RejectedUnit]) {
    for unit in rejected {
        warn!(
            unit = %unit.id,
            reason = %unit.reason,
            "dropping unit with invalid resident count"
        );
    }
}
