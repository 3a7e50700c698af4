//! Create Allocation Handler

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use rateio::allocation::{Allocation, apportion};

use crate::{
    allocations::request::{AllocationRequest, warn_dropped},
    extensions::OptionExt,
};

/// Allocation response, on the original API's wire names.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AllocationResponse {
    /// Corrected fixed share per unit, rounded to 2 decimal places.
    #[serde(rename = "valor_fixo_corrigido")]
    pub corrected_fixed_share: f64,

    /// Variable rate per resident, rounded to 2 decimal places.
    #[serde(rename = "valor_variavel_por_residente")]
    pub variable_rate_per_resident: f64,

    /// Sum of the rounded per-unit amounts.
    #[serde(rename = "total_arrecadado")]
    pub total_collected: f64,

    /// Sum of the bill's four components.
    #[serde(rename = "valor_total_da_conta")]
    pub bill_total: f64,

    /// Total residents across the roster.
    #[serde(rename = "total_residentes")]
    pub total_residents: u64,

    /// Amount owed per unit, ordered by unit id.
    #[serde(rename = "detalhes_por_apartamento")]
    pub per_unit: BTreeMap<String, f64>,

    /// Units dropped because their resident count did not parse.
    #[serde(
        rename = "apartamentos_descartados",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub dropped_units: Vec<String>,
}

impl AllocationResponse {
    fn from_allocation(
        allocation: &Allocation,
        dropped_units: Vec<String>,
    ) -> Result<Self, StatusError> {
        let per_unit = allocation
            .shares
            .iter()
            .map(|(id, amount)| {
                Ok((
                    id.clone(),
                    amount.to_f64().or_500("per-unit amount not representable")?,
                ))
            })
            .collect::<Result<_, StatusError>>()?;

        Ok(Self {
            corrected_fixed_share: allocation
                .fixed_share_per_unit
                .round_dp(2)
                .to_f64()
                .or_500("fixed share not representable")?,
            variable_rate_per_resident: allocation
                .variable_rate_per_occupant
                .round_dp(2)
                .to_f64()
                .or_500("variable rate not representable")?,
            total_collected: allocation
                .total_collected
                .to_f64()
                .or_500("collected total not representable")?,
            bill_total: allocation
                .grand_total
                .round_dp(2)
                .to_f64()
                .or_500("bill total not representable")?,
            total_residents: allocation.total_occupants,
            per_unit,
            dropped_units,
        })
    }
}

/// Create Allocation Handler
#[endpoint(
    tags("allocations"),
    summary = "Apportion a bill across units",
    responses(
        (status_code = StatusCode::OK, description = "Bill apportioned"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AllocationRequest>,
) -> Result<Json<AllocationResponse>, StatusError> {
    let request = json.into_inner();

    let bill = request.bill()?;
    let (roster, rejected) = request.roster();

    warn_dropped(&rejected);

    let allocation = apportion(&roster, &bill);
    let dropped_units = rejected.into_iter().map(|unit| unit.id).collect();

    Ok(Json(AllocationResponse::from_allocation(
        &allocation,
        dropped_units,
    )?))
}
