//! Get Shipping Price Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::Envelope,
    extensions::*,
    shipping::{ShippingPriceResponse, errors::into_status_error},
    state::State,
};

/// Get Shipping Price Handler
///
/// Returns the configured default until a price has been set.
#[endpoint(
    tags("shipping"),
    summary = "Get Shipping Price",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Current shipping price"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Envelope<ShippingPriceResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let shipping_price = state
        .app
        .shipping
        .get_shipping_price()
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::success(ShippingPriceResponse { shipping_price }))
}
