//! Cart Checkout Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::data::OrderSource;

use crate::envelope::Envelope;

use super::{
    CheckoutDetails, PaymentMethodBody, ShippingAddressBody, get::OrderResponse, place_order,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    pub shipping_address: ShippingAddressBody,

    #[serde(default)]
    pub payment_method: PaymentMethodBody,

    /// Base64 image, optionally as a `data:` URL
    pub payment_proof: Option<String>,

    /// Admin-only override of the configured shipping price
    pub shipping_price: Option<u64>,
}

impl From<CheckoutRequest> for CheckoutDetails {
    fn from(request: CheckoutRequest) -> Self {
        CheckoutDetails {
            shipping_address: request.shipping_address,
            payment_method: request.payment_method,
            payment_proof: request.payment_proof,
            shipping_price: request.shipping_price,
        }
    }
}

/// Cart Checkout Handler
///
/// Places an order for the current user's cart at catalog prices, decrements
/// stock and deletes the cart. Fails without side effects when any product
/// is short.
#[endpoint(
    tags("orders"),
    summary = "Checkout Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or insufficient stock"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or product not found"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<OrderResponse>>, StatusError> {
    place_order(depot, res, OrderSource::Cart, json.into_inner().into()).await
}
