//! Order Data

use storefront::orders::PaymentMethod;

use crate::domain::{
    orders::records::{OrderUuid, ShippingAddress},
    products::records::ProductUuid,
    users::records::UserUuid,
};

/// A line supplied directly at checkout. Prices always come from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub color: Option<String>,
}

/// Where a checkout takes its lines from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderSource {
    /// The user's cart, which is deleted once the order is placed.
    Cart,

    /// Lines supplied with the request. Any cart is left untouched.
    Items(Vec<NewOrderLine>),
}

/// Checkout request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    pub uuid: OrderUuid,
    pub user: UserUuid,
    pub source: OrderSource,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,

    /// URL of an already-stored proof of payment.
    pub payment_proof_url: Option<String>,

    /// Overrides the registry's shipping price.
    pub shipping_price: Option<u64>,
}

/// Which orders a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    All,
    User(UserUuid),
}
