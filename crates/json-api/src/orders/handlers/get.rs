//! Get Order Handler

use std::{string::ToString, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::{OrderItemRecord, OrderOwner, OrderRecord};

use crate::{
    envelope::Envelope,
    extensions::*,
    orders::{ShippingAddressBody, errors::into_status_error},
    state::State,
};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// The user who placed the order
    pub user: OrderOwnerResponse,

    /// Lines as priced at checkout
    pub items: Vec<OrderItemResponse>,

    pub shipping_address: ShippingAddressBody,

    /// `cash` or `insta_pay`
    pub payment_method: String,

    pub payment_proof_url: Option<String>,
    pub shipping_price: u64,
    pub total_order_price: u64,
    pub is_paid: bool,
    pub paid_at: Option<String>,
    pub is_delivered: bool,
    pub delivered_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into(),
            user: order.user.into(),
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            shipping_address: order.shipping_address.into(),
            payment_method: order.payment_method.to_string(),
            payment_proof_url: order.payment_proof_url,
            shipping_price: order.shipping_price,
            total_order_price: order.total_order_price,
            is_paid: order.is_paid,
            paid_at: order.paid_at.as_ref().map(ToString::to_string),
            is_delivered: order.is_delivered,
            delivered_at: order.delivered_at.as_ref().map(ToString::to_string),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Owner
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderOwnerResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
}

impl From<OrderOwner> for OrderOwnerResponse {
    fn from(owner: OrderOwner) -> Self {
        Self {
            uuid: owner.uuid.into(),
            name: owner.name,
            email: owner.email,
        }
    }
}

/// Order Item
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub quantity: u32,

    /// Unit price at checkout
    pub price: u64,

    pub color: Option<String>,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            quantity: item.quantity,
            price: item.price,
            color: item.color,
        }
    }
}

/// Get Order Handler
///
/// Owners see their own orders; admins see any order.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.current_user_or_401()?;

    let order = state
        .app
        .orders
        .get_order(order.into_inner().into(), requester)
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::success(order.into()))
}
