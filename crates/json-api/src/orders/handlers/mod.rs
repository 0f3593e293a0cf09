//! Order Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod direct;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod mine;
pub(crate) mod shipping;

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{http::header::LOCATION, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use storefront::{orders::PaymentMethod, users::Requester};
use tracing::{info, warn};

use storefront_app::{
    domain::orders::{
        data::{Checkout, OrderSource},
        records::{OrderUuid, ShippingAddress},
    },
    uploads::{ORDERS_FOLDER, decode_base64_image},
};

use crate::{
    envelope::Envelope,
    extensions::*,
    observability::metrics,
    orders::{
        errors::{into_status_error, upload_status_error},
        get::OrderResponse,
    },
    state::State,
};

/// Shipping Address
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingAddressBody {
    pub address: String,
    pub phone: String,
    pub city: String,
}

impl From<ShippingAddressBody> for ShippingAddress {
    fn from(body: ShippingAddressBody) -> Self {
        ShippingAddress {
            address: body.address,
            phone: body.phone,
            city: body.city,
        }
    }
}

impl From<ShippingAddress> for ShippingAddressBody {
    fn from(address: ShippingAddress) -> Self {
        ShippingAddressBody {
            address: address.address,
            phone: address.phone,
            city: address.city,
        }
    }
}

/// Payment Method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum PaymentMethodBody {
    /// Paid on delivery
    #[default]
    Cash,

    /// Prepaid transfer, evidenced by `payment_proof`
    InstaPay,
}

impl From<PaymentMethodBody> for PaymentMethod {
    fn from(body: PaymentMethodBody) -> Self {
        match body {
            PaymentMethodBody::Cash => PaymentMethod::Cash,
            PaymentMethodBody::InstaPay => PaymentMethod::InstaPay,
        }
    }
}

/// Checkout details shared by cart and direct checkouts.
struct CheckoutDetails {
    shipping_address: ShippingAddressBody,
    payment_method: PaymentMethodBody,
    payment_proof: Option<String>,
    shipping_price: Option<u64>,
}

/// Store any proof image, place the order and answer 201. The proof is
/// removed again when checkout fails.
async fn place_order(
    depot: &Depot,
    res: &mut Response,
    source: OrderSource,
    details: CheckoutDetails,
) -> Result<Json<Envelope<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.current_user_or_401()?;

    let payment_proof_url = match details.payment_proof {
        Some(encoded) => {
            let bytes = decode_base64_image(&encoded).map_err(upload_status_error)?;

            Some(
                state
                    .app
                    .uploads
                    .upload(ORDERS_FOLDER, bytes)
                    .await
                    .map_err(upload_status_error)?,
            )
        }
        None => None,
    };

    let checkout = Checkout {
        uuid: OrderUuid::new(),
        user: requester.user.into(),
        source,
        shipping_address: details.shipping_address.into(),
        payment_method: details.payment_method.into(),
        payment_proof_url: payment_proof_url.clone(),
        shipping_price: shipping_override(requester, details.shipping_price),
    };

    let order = match state.app.orders.checkout(checkout, Timestamp::now()).await {
        Ok(order) => order,
        Err(checkout_error) => {
            if let Some(url) = payment_proof_url {
                discard_proof(state, &url).await;
            }

            return Err(into_status_error(checkout_error));
        }
    };

    metrics::record_order_placed();

    info!(
        order_uuid = %order.uuid,
        total = order.total_order_price,
        "order placed"
    );

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Envelope::success(order.into()))
}

/// Remove a proof image whose order was never placed.
async fn discard_proof(state: &State, url: &str) {
    if let Err(error) = state.app.uploads.remove(url).await {
        warn!(url, "failed to remove payment proof of rejected order: {error}");
    }
}

/// Only admins may set an order's shipping price at checkout.
fn shipping_override(requester: Requester, shipping_price: Option<u64>) -> Option<u64> {
    shipping_price.filter(|_| requester.role.is_admin())
}
