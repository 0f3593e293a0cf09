//! Direct Checkout Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::data::{NewOrderLine, OrderSource};

use crate::envelope::Envelope;

use super::{
    CheckoutDetails, PaymentMethodBody, ShippingAddressBody, get::OrderResponse, place_order,
};

/// Order Line Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineRequest {
    pub product_uuid: Uuid,
    pub quantity: u32,
    pub color: Option<String>,
}

impl From<OrderLineRequest> for NewOrderLine {
    fn from(line: OrderLineRequest) -> Self {
        NewOrderLine {
            product_uuid: line.product_uuid.into(),
            quantity: line.quantity,
            color: line.color,
        }
    }
}

/// Direct Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DirectCheckoutRequest {
    /// Lines to order; prices come from the catalog
    pub items: Vec<OrderLineRequest>,

    pub shipping_address: ShippingAddressBody,

    #[serde(default)]
    pub payment_method: PaymentMethodBody,

    /// Base64 image, optionally as a `data:` URL
    pub payment_proof: Option<String>,

    /// Admin-only override of the configured shipping price
    pub shipping_price: Option<u64>,
}

/// Direct Checkout Handler
///
/// Places an order for the supplied lines. The caller's cart is untouched.
#[endpoint(
    tags("orders"),
    summary = "Checkout Items",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "No items or insufficient stock"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<DirectCheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<OrderResponse>>, StatusError> {
    let request = json.into_inner();

    let source = OrderSource::Items(request.items.into_iter().map(Into::into).collect());

    let details = CheckoutDetails {
        shipping_address: request.shipping_address,
        payment_method: request.payment_method,
        payment_proof: request.payment_proof,
        shipping_price: request.shipping_price,
    };

    place_order(depot, res, source, details).await
}
