//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::records::{CartItemRecord, CartRecord};

use crate::{carts::errors::into_status_error, envelope::Envelope, extensions::*, state::State};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The owner of the cart
    pub user_uuid: Uuid,

    /// The items in the cart
    pub items: Vec<CartItemResponse>,

    /// Sum of quantity times captured price over every item
    pub total_cart_price: u64,

    /// Total after the applied coupon, if any
    pub total_price_after_discount: Option<u64>,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        CartResponse {
            uuid: cart.uuid.into(),
            user_uuid: cart.user_uuid.into(),
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            total_cart_price: cart.total_cart_price,
            total_price_after_discount: cart.total_price_after_discount,
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart item
    pub uuid: Uuid,

    /// The unique identifier of the product in the cart item
    pub product_uuid: Uuid,

    pub color: Option<String>,

    pub quantity: u32,

    /// Unit price captured when the product was added
    pub price: u64,

    pub created_at: String,

    pub updated_at: String,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            color: item.color,
            quantity: item.quantity,
            price: item.price,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

/// Get Cart Handler
///
/// Returns the current user's cart.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Envelope<CartResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.current_user_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(requester.user.into())
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::success(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        products::records::ProductUuid,
        users::records::UserUuid,
    };

    use crate::test_helpers::{TEST_USER, TestState};

    use super::{
        super::tests::{make_cart, make_item},
        *,
    };

    fn make_service(carts: MockCartsService) -> Service {
        TestState::new()
            .carts(carts)
            .serve_as(TEST_USER, Router::with_path("cart").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_current_users_cart() -> TestResult {
        let cart = make_cart(vec![make_item(ProductUuid::new(), 2, 1500)]);

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(|user| *user == UserUuid::from_uuid(TEST_USER.user))
            .return_once(move |_| Ok(cart));

        let mut res = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Envelope<CartResponse> = res.take_json().await?;

        assert_eq!(body.data.total_cart_price, 3000);
        assert_eq!(body.data.items.len(), 1);
        assert_eq!(body.data.total_price_after_discount, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_without_user_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com/cart")
            .send(
                &TestState::new().serve_anonymous(Router::with_path("cart").get(handler)),
            )
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
