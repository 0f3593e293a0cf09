//! Get Coupon Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::coupons::records::CouponRecord;

use crate::{
    coupons::errors::into_status_error, envelope::Envelope, extensions::*, state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponResponse {
    pub uuid: Uuid,

    /// The code customers enter at the cart
    pub name: String,

    /// Percentage taken off the cart total
    pub discount: u16,

    pub expires_at: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CouponRecord> for CouponResponse {
    fn from(coupon: CouponRecord) -> Self {
        Self {
            uuid: coupon.uuid.into(),
            name: coupon.name,
            discount: coupon.discount.value(),
            expires_at: coupon.expires_at.to_string(),
            created_at: coupon.created_at.to_string(),
            updated_at: coupon.updated_at.to_string(),
        }
    }
}

/// Get Coupon Handler
#[endpoint(
    tags("coupons"),
    summary = "Get Coupon",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    coupon: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<CouponResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let coupon = state
        .app
        .coupons
        .get_coupon(coupon.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::success(coupon.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::coupons::{
        CouponsServiceError, MockCouponsService, records::CouponUuid,
    };

    use crate::test_helpers::{TEST_ADMIN, TestState};

    use super::{super::tests::make_coupon, *};

    fn make_service(coupons: MockCouponsService) -> Service {
        TestState::new()
            .coupons(coupons)
            .serve_as(TEST_ADMIN, Router::with_path("coupons/{coupon}").get(handler))
    }

    #[tokio::test]
    async fn test_get_coupon_returns_200() -> TestResult {
        let uuid = CouponUuid::new();
        let coupon = make_coupon(uuid)?;

        let mut coupons = MockCouponsService::new();

        coupons
            .expect_get_coupon()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(coupon));

        let body: Envelope<CouponResponse> =
            TestClient::get(format!("http://example.com/coupons/{uuid}"))
                .send(&make_service(coupons))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.name, "SUMMER20");
        assert_eq!(body.data.discount, 20);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_coupon_returns_404() -> TestResult {
        let uuid = CouponUuid::new();

        let mut coupons = MockCouponsService::new();

        coupons
            .expect_get_coupon()
            .once()
            .return_once(|_| Err(CouponsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/coupons/{uuid}"))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
