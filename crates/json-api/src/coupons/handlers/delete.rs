//! Delete Coupon Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{coupons::errors::into_status_error, extensions::*, state::State};

/// Delete Coupon Handler
#[endpoint(
    tags("coupons"),
    summary = "Delete Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Coupon deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
    ),
)]
pub(crate) async fn handler(
    coupon: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .coupons
        .delete_coupon(coupon.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use storefront_app::domain::coupons::{
        CouponsServiceError, MockCouponsService, records::CouponUuid,
    };

    use crate::test_helpers::{TEST_ADMIN, TestState};

    use super::*;

    fn make_service(coupons: MockCouponsService) -> Service {
        TestState::new().coupons(coupons).serve_as(
            TEST_ADMIN,
            Router::with_path("coupons/{coupon}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_coupon_success() -> TestResult {
        let uuid = CouponUuid::new();

        let mut coupons = MockCouponsService::new();

        coupons
            .expect_delete_coupon()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/coupons/{uuid}"))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_coupon_returns_404() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_delete_coupon()
            .once()
            .return_once(|_| Err(CouponsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/coupons/{}", CouponUuid::new()))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
