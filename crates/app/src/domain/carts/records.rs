//! Cart Records

use jiff::Timestamp;
use storefront::pricing::PricedLine;

use crate::{
    domain::{products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
///
/// `total_price_after_discount` is only set while a coupon applied to the
/// current items is in effect.
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub user_uuid: UserUuid,
    pub items: Vec<CartItemRecord>,
    pub total_cart_price: u64,
    pub total_price_after_discount: Option<u64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub color: Option<String>,
    pub quantity: u32,

    /// Unit price captured when the product was first added.
    pub price: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PricedLine for CartItemRecord {
    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn unit_price(&self) -> u64 {
        self.price
    }
}
