//! Order Records

use jiff::Timestamp;
use storefront::{
    listing::{FieldKind, FieldSpec, ListingSpec},
    orders::PaymentMethod,
    pricing::PricedLine,
};

use crate::{
    domain::{products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Fields an order listing may filter or sort on, and the response keys it
/// may project.
pub const ORDERS_LISTING: ListingSpec = ListingSpec::new(
    &[
        FieldSpec::new("uuid", "uuid", FieldKind::Uuid),
        FieldSpec::new("user_uuid", "user_uuid", FieldKind::Uuid),
        FieldSpec::new("payment_method", "payment_method", FieldKind::Text),
        FieldSpec::new("shipping_city", "shipping_city", FieldKind::Text),
        FieldSpec::new("shipping_price", "shipping_price", FieldKind::Integer),
        FieldSpec::new("total_order_price", "total_order_price", FieldKind::Integer),
        FieldSpec::new("is_paid", "is_paid", FieldKind::Boolean),
        FieldSpec::new("paid_at", "paid_at", FieldKind::Timestamp),
        FieldSpec::new("is_delivered", "is_delivered", FieldKind::Boolean),
        FieldSpec::new("delivered_at", "delivered_at", FieldKind::Timestamp),
        FieldSpec::new("created_at", "created_at", FieldKind::Timestamp),
        FieldSpec::new("updated_at", "updated_at", FieldKind::Timestamp),
    ],
    &[],
)
.with_projection(&[
    "uuid",
    "user",
    "items",
    "shipping_address",
    "payment_method",
    "payment_proof_url",
    "shipping_price",
    "total_order_price",
    "is_paid",
    "paid_at",
    "is_delivered",
    "delivered_at",
    "created_at",
    "updated_at",
]);

/// Public fields of the user who placed an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderOwner {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingAddress {
    pub address: String,
    pub phone: String,
    pub city: String,
}

/// Order Record
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user: OrderOwner,
    pub items: Vec<OrderItemRecord>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub payment_proof_url: Option<String>,
    pub shipping_price: u64,
    pub total_order_price: u64,
    pub is_paid: bool,
    pub paid_at: Option<Timestamp>,
    pub is_delivered: bool,
    pub delivered_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item Record
///
/// A snapshot of the line at checkout. Later catalog changes never touch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub price: u64,
    pub color: Option<String>,
}

impl PricedLine for OrderItemRecord {
    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn unit_price(&self) -> u64 {
        self.price
    }
}
