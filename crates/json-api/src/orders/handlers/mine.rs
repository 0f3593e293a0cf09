//! My Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use storefront_app::domain::orders::{data::OrderScope, records::ORDERS_LISTING};

use crate::{
    envelope::ListingEnvelope,
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// My Orders Handler
///
/// Lists the current user's orders.
#[endpoint(
    tags("orders"),
    summary = "List My Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ListingEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.current_user_or_401()?;
    let listing = req.listing_query_or_400(&ORDERS_LISTING)?;

    let orders = state
        .app
        .orders
        .list_orders(OrderScope::User(requester.user.into()), listing.clone())
        .await
        .map_err(into_status_error)?;

    ListingEnvelope::from_page(orders.map(OrderResponse::from), &listing)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::{
        domain::{orders::MockOrdersService, users::records::UserUuid},
        listing::Page,
    };
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER, TestState};

    use super::*;

    #[tokio::test]
    async fn test_mine_is_scoped_to_current_user() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|scope, listing| {
                *scope == OrderScope::User(UserUuid::from_uuid(TEST_USER.user))
                    && listing.page.page() == 2
            })
            .return_once(|_, _| {
                Ok(Page {
                    items: Vec::new(),
                    total: 0,
                })
            });

        let service = TestState::new()
            .orders(orders)
            .serve_as(TEST_USER, Router::with_path("orders/mine").get(handler));

        let body: ListingEnvelope = TestClient::get("http://example.com/orders/mine?page=2")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body.results, 0);
        assert_eq!(body.pagination.number_of_pages, 1);
        assert_eq!(body.pagination.prev, Some(1));

        Ok(())
    }
}
