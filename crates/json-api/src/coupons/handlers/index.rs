//! Coupon Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use storefront_app::domain::coupons::records::COUPONS_LISTING;

use crate::{
    coupons::{errors::into_status_error, get::CouponResponse},
    envelope::ListingEnvelope,
    extensions::*,
    state::State,
};

/// Coupon Index Handler
///
/// `keyword` searches coupon names.
#[endpoint(
    tags("coupons"),
    summary = "List Coupons",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ListingEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let listing = req.listing_query_or_400(&COUPONS_LISTING)?;

    let coupons = state
        .app
        .coupons
        .list_coupons(listing.clone())
        .await
        .map_err(into_status_error)?;

    ListingEnvelope::from_page(coupons.map(CouponResponse::from), &listing)
}
