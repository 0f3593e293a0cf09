//! Order Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use storefront_app::domain::orders::{data::OrderScope, records::ORDERS_LISTING};

use crate::{
    envelope::ListingEnvelope,
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Order Index Handler
///
/// Lists every order. Filter by customer with `user_uuid=...`.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ListingEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let listing = req.listing_query_or_400(&ORDERS_LISTING)?;

    let orders = state
        .app
        .orders
        .list_orders(OrderScope::All, listing.clone())
        .await
        .map_err(into_status_error)?;

    ListingEnvelope::from_page(orders.map(OrderResponse::from), &listing)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront::listing::FilterValue;
    use storefront_app::{
        domain::orders::{MockOrdersService, records::OrderUuid},
        listing::Page,
    };
    use testresult::TestResult;

    use crate::test_helpers::{TEST_ADMIN, TEST_USER, TestState};

    use super::{super::tests::make_order, *};

    fn make_service(orders: MockOrdersService) -> Service {
        TestState::new()
            .orders(orders)
            .serve_as(TEST_ADMIN, Router::with_path("orders").get(handler))
    }

    #[tokio::test]
    async fn test_index_lists_all_orders_filtered_by_user() -> TestResult {
        let order = make_order(OrderUuid::new());

        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|scope, listing| {
                *scope == OrderScope::All
                    && listing
                        .filters
                        .iter()
                        .any(|filter| filter.value == FilterValue::Uuid(TEST_USER.user))
            })
            .return_once(move |_, _| {
                Ok(Page {
                    items: vec![order],
                    total: 1,
                })
            });

        let body: ListingEnvelope =
            TestClient::get(format!("http://example.com/orders?user_uuid={}", TEST_USER.user))
                .send(&make_service(orders))
                .await
                .take_json()
                .await?;

        assert_eq!(body.results, 1);

        Ok(())
    }

    fn listing_one_order() -> MockOrdersService {
        let order = make_order(OrderUuid::new());

        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().return_once(move |_, _| {
            Ok(Page {
                items: vec![order],
                total: 1,
            })
        });

        orders
    }

    async fn first_document_keys(query: &str) -> TestResult<Vec<String>> {
        let body: ListingEnvelope = TestClient::get(format!("http://example.com/orders?{query}"))
            .send(&make_service(listing_one_order()))
            .await
            .take_json()
            .await?;

        let mut keys: Vec<String> = body
            .data
            .first()
            .and_then(serde_json::Value::as_object)
            .ok_or("expected one order document")?
            .keys()
            .cloned()
            .collect();

        keys.sort();

        Ok(keys)
    }

    #[tokio::test]
    async fn test_fields_select_the_owner_and_line_items() -> TestResult {
        let keys = first_document_keys("fields=user,items,total_order_price").await?;

        assert_eq!(keys, ["items", "total_order_price", "user", "uuid"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_fields_exclude_the_shipping_address() -> TestResult {
        let keys = first_document_keys("fields=-shipping_address,-user").await?;

        assert!(!keys.iter().any(|key| key == "shipping_address" || key == "user"));
        assert!(keys.iter().any(|key| key == "items"));

        Ok(())
    }

    #[tokio::test]
    async fn test_fields_reject_filter_only_names() -> TestResult {
        let res = TestClient::get("http://example.com/orders?fields=shipping_city")
            .send(&make_service(MockOrdersService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[test]
    fn every_response_key_is_projectable() -> TestResult {
        let document = serde_json::to_value(OrderResponse::from(make_order(OrderUuid::new())))?;

        let keys = document.as_object().ok_or("order renders as an object")?.keys();

        for key in keys {
            assert!(
                ORDERS_LISTING.projectable(key).is_some(),
                "{key} cannot be projected"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_index_rejects_unparseable_filter() -> TestResult {
        let res = TestClient::get("http://example.com/orders?total_order_price[gt]=lots")
            .send(&make_service(MockOrdersService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
