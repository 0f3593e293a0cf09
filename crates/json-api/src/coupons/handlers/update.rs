//! Update Coupon Handler

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

use storefront_app::domain::coupons::data::CouponUpdate;

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

/// Update Coupon Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCouponRequest {
    pub name: Option<String>,
    pub discount: Option<i64>,
    pub expires_at: Option<String>,
}

impl UpdateCouponRequest {
    fn into_update(self) -> Result<CouponUpdate, StatusError> {
        Ok(CouponUpdate {
            name: self.name,
            discount: self.discount.map(parse_discount).transpose()?,
            expires_at: self.expires_at.as_deref().map(parse_expiry).transpose()?,
        })
    }
}

/// Update Coupon Handler
#[endpoint(
    tags("coupons"),
    summary = "Update Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Coupon updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
    ),
)]
pub(crate) async fn handler(
    coupon: PathParam<Uuid>,
    json: JsonBody<UpdateCouponRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<CouponResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let update = json.into_inner().into_update()?;

    let coupon = state
        .app
        .coupons
        .update_coupon(coupon.into_inner().into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::success(coupon.into()))
}
