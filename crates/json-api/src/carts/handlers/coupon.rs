//! Apply Coupon Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{errors::into_status_error, get::CartResponse},
    envelope::Envelope,
    extensions::*,
    state::State,
};

/// Apply Coupon Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplyCouponRequest {
    /// Coupon name
    pub code: String,
}

/// Apply Coupon Handler
///
/// Sets `total_price_after_discount` from the current cart total. Unknown and
/// expired codes are rejected alike.
#[endpoint(
    tags("carts"),
    summary = "Apply Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Coupon applied"),
        (status_code = StatusCode::BAD_REQUEST, description = "Coupon invalid or expired"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ApplyCouponRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<CartResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.current_user_or_401()?;
    let request = json.into_inner();

    let cart = state
        .app
        .carts
        .apply_coupon(requester.user.into(), request.code.trim(), Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::success(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{TEST_USER, TestState};

    use super::{
        super::tests::{make_cart, make_item},
        *,
    };

    fn make_service(carts: MockCartsService) -> Service {
        TestState::new()
            .carts(carts)
            .serve_as(TEST_USER, Router::with_path("cart/coupon").put(handler))
    }

    #[tokio::test]
    async fn test_apply_coupon_sets_discounted_total() -> TestResult {
        let mut cart = make_cart(vec![make_item(ProductUuid::new(), 1, 10_000)]);

        cart.total_price_after_discount = Some(8000);

        let mut carts = MockCartsService::new();

        carts
            .expect_apply_coupon()
            .once()
            .withf(|_, code, _| code == "SUMMER20")
            .return_once(move |_, _, _| Ok(cart));

        let body: Envelope<CartResponse> = TestClient::put("http://example.com/cart/coupon")
            .json(&json!({ "code": " SUMMER20 " }))
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert_eq!(body.data.total_cart_price, 10_000);
        assert_eq!(body.data.total_price_after_discount, Some(8000));

        Ok(())
    }

    #[tokio::test]
    async fn test_expired_coupon_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_apply_coupon()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::CouponInvalid));

        let res = TestClient::put("http://example.com/cart/coupon")
            .json(&json!({ "code": "OLD10" }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
