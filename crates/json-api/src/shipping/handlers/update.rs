//! Set Shipping Price Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    envelope::Envelope,
    extensions::*,
    shipping::{ShippingPriceResponse, errors::into_status_error},
    state::State,
};

/// Set Shipping Price Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetShippingPriceRequest {
    /// Must not be negative
    pub shipping_price: i64,
}

/// Set Shipping Price Handler
///
/// Affects orders placed afterwards. Existing orders keep their price.
#[endpoint(
    tags("shipping"),
    summary = "Set Shipping Price",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Shipping price stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Negative shipping price"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SetShippingPriceRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<ShippingPriceResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let shipping_price = state
        .app
        .shipping
        .set_shipping_price(json.into_inner().shipping_price)
        .await
        .map_err(into_status_error)?;

    info!(shipping_price, "shipping price updated");

    Ok(Envelope::success(ShippingPriceResponse { shipping_price }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::shipping::{MockShippingService, ShippingServiceError};

    use crate::test_helpers::{TEST_ADMIN, TestState};

    use super::*;

    fn make_service(shipping: MockShippingService) -> Service {
        TestState::new()
            .shipping(shipping)
            .serve_as(TEST_ADMIN, Router::with_path("shipping-price").put(handler))
    }

    #[tokio::test]
    async fn test_set_shipping_price() -> TestResult {
        let mut shipping = MockShippingService::new();

        shipping
            .expect_set_shipping_price()
            .once()
            .withf(|price| *price == 0)
            .return_once(|_| Ok(0));

        let body: Envelope<ShippingPriceResponse> =
            TestClient::put("http://example.com/shipping-price")
                .json(&json!({ "shipping_price": 0 }))
                .send(&make_service(shipping))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.shipping_price, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_negative_shipping_price_returns_400() -> TestResult {
        let negative = u64::try_from(-1_i64)
            .err()
            .ok_or("negative price converted")?;

        let mut shipping = MockShippingService::new();

        shipping
            .expect_set_shipping_price()
            .once()
            .return_once(move |_| Err(ShippingServiceError::InvalidPrice(negative)));

        let res = TestClient::put("http://example.com/shipping-price")
            .json(&json!({ "shipping_price": -1 }))
            .send(&make_service(shipping))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
