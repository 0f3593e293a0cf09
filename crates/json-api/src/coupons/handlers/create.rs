//! Create Coupon Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::coupons::{data::NewCoupon, records::CouponUuid};

use crate::{
    coupons::{
        errors::into_status_error,
        get::CouponResponse,
        handlers::{parse_discount, parse_expiry},
    },
    envelope::Envelope,
    extensions::*,
    state::State,
};

/// Create Coupon Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCouponRequest {
    pub name: String,

    /// Whole percentage between 0 and 100
    pub discount: i64,

    /// RFC 3339 timestamp after which the coupon is rejected
    pub expires_at: String,
}

/// Create Coupon Handler
#[endpoint(
    tags("coupons"),
    summary = "Create Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Coupon created"),
        (status_code = StatusCode::CONFLICT, description = "Coupon name already taken"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCouponRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<CouponResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let coupon = NewCoupon {
        uuid: CouponUuid::new(),
        name: request.name,
        discount: parse_discount(request.discount)?,
        expires_at: parse_expiry(&request.expires_at)?,
    };

    let coupon = state
        .app
        .coupons
        .create_coupon(coupon)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/coupons/{}", coupon.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Envelope::success(coupon.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::coupons::{CouponsServiceError, MockCouponsService};

    use crate::test_helpers::{TEST_ADMIN, TestState};

    use super::{super::tests::make_coupon, *};

    fn make_service(coupons: MockCouponsService) -> Service {
        TestState::new()
            .coupons(coupons)
            .serve_as(TEST_ADMIN, Router::with_path("coupons").post(handler))
    }

    #[tokio::test]
    async fn test_create_coupon_success() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_create_coupon()
            .once()
            .withf(|new| new.name == "SUMMER20" && new.discount.value() == 20)
            .return_once(|new| {
                make_coupon(new.uuid).map_err(|_invalid| CouponsServiceError::InvalidData)
            });

        let mut res = TestClient::post("http://example.com/coupons")
            .json(&json!({
                "name": "SUMMER20",
                "discount": 20,
                "expires_at": "2030-01-01T00:00:00Z"
            }))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: Envelope<CouponResponse> = res.take_json().await?;

        assert_eq!(body.data.discount, 20);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_coupon_out_of_range_discount_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/coupons")
            .json(&json!({
                "name": "TOO_MUCH",
                "discount": 101,
                "expires_at": "2030-01-01T00:00:00Z"
            }))
            .send(&make_service(MockCouponsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_coupon_bad_expiry_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/coupons")
            .json(&json!({ "name": "SOON", "discount": 5, "expires_at": "tomorrow" }))
            .send(&make_service(MockCouponsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_duplicate_coupon_returns_409() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_create_coupon()
            .once()
            .return_once(|_| Err(CouponsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/coupons")
            .json(&json!({
                "name": "SUMMER20",
                "discount": 20,
                "expires_at": "2030-01-01T00:00:00Z"
            }))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
