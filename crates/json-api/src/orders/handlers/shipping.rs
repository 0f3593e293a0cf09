//! Update Order Shipping Handler

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
    envelope::Envelope, extensions::*, orders::errors::into_status_error, state::State,
};

use super::get::OrderResponse;

/// Order Shipping Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderShippingRequest {
    /// Must not be negative
    pub shipping_price: i64,
}

/// Update Order Shipping Handler
///
/// Replaces the order's shipping price and shifts its total by the difference.
#[endpoint(
    tags("orders"),
    summary = "Update Order Shipping Price",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Negative shipping price"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
#[tracing::instrument(name = "orders.update_shipping", skip(json, depot), err)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<OrderShippingRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .update_shipping_price(order.into_inner().into(), json.into_inner().shipping_price)
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::success(order.into()))
}
