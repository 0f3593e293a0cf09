//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, get::CartResponse},
    envelope::Envelope,
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// New quantity, at least 1
    pub quantity: u32,
}

/// Update Cart Item Handler
///
/// Any applied coupon is cleared.
#[endpoint(
    tags("carts"),
    summary = "Update Cart Item Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or item not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<CartResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.current_user_or_401()?;

    let cart = state
        .app
        .carts
        .update_item_quantity(
            requester.user.into(),
            item.into_inner().into(),
            json.into_inner().quantity,
        )
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
        carts::{CartsServiceError, MockCartsService, records::CartItemUuid},
        products::records::ProductUuid,
    };

    use crate::{
        carts::tests::{make_cart, make_item},
        test_helpers::{TEST_USER, TestState},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        TestState::new()
            .carts(carts)
            .serve_as(TEST_USER, Router::with_path("cart/items/{item}").put(handler))
    }

    #[tokio::test]
    async fn test_update_quantity_returns_recomputed_cart() -> TestResult {
        let line = make_item(ProductUuid::new(), 4, 250);
        let item = line.uuid;
        let cart = make_cart(vec![line]);

        let mut carts = MockCartsService::new();

        carts
            .expect_update_item_quantity()
            .once()
            .withf(move |_, i, quantity| *i == item && *quantity == 4)
            .return_once(move |_, _, _| Ok(cart));

        let body: Envelope<CartResponse> =
            TestClient::put(format!("http://example.com/cart/items/{item}"))
                .json(&json!({ "quantity": 4 }))
                .send(&make_service(carts))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.total_cart_price, 1000);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_item_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_item_quantity()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::ItemNotFound));

        let res = TestClient::put(format!(
            "http://example.com/cart/items/{}",
            CartItemUuid::new()
        ))
        .json(&json!({ "quantity": 2 }))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
