//! CSV Statement Export Handler

use salvo::{http::header::CONTENT_TYPE, oapi::extract::JsonBody, prelude::*};

use rateio::{allocation::apportion, statement::Statement};

use crate::{
    allocations::request::{AllocationRequest, warn_dropped},
    extensions::ResultExt,
};

/// Export Allocation Statement Handler
///
/// Apportions the bill and responds with the statement as CSV, one row per
/// unit in id order.
#[endpoint(
    tags("allocations"),
    summary = "Apportion a bill and export the statement as CSV",
    responses(
        (status_code = StatusCode::OK, description = "CSV statement"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AllocationRequest>,
    res: &mut Response,
) -> Result<(), StatusError> {
    let request = json.into_inner();

    let bill = request.bill()?;
    let (roster, rejected) = request.roster();

    warn_dropped(&rejected);

    let allocation = apportion(&roster, &bill);
    let csv = Statement::new(&roster, &allocation).to_csv();

    res.add_header(CONTENT_TYPE, "text/csv; charset=utf-8", true)
        .or_500("failed to set content type header")?;

    res.write_body(csv)
        .or_500("failed to write csv body")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn make_service() -> Service {
        Service::new(
            Router::with_path("allocations").push(Router::with_path("csv").post(handler)),
        )
    }

    #[tokio::test]
    async fn test_csv_export() -> TestResult {
        let mut res = TestClient::post("http://example.com/allocations/csv")
            .json(&json!({
                "distribuicao_residentes": { "102": 3, "101": 1 },
                "valor_fixo": 10.0,
                "valor_variavel": 20.0,
                "recursos_hidr_agua": 0.0,
                "recursos_hidr_esg": 0.0,
            }))
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let content_type = res
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);

        let body = res.take_string().await?;

        assert_eq!(content_type.as_deref(), Some("text/csv; charset=utf-8"));
        assert_eq!(
            body,
            "apartamento,moradores,valor\n101,1,10.00\n102,3,20.00\n"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_csv_export_rejects_malformed_body() -> TestResult {
        let res = TestClient::post("http://example.com/allocations/csv")
            .json(&json!({ "valor_fixo": 10.0 }))
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
