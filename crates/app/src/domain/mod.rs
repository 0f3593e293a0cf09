//! Storefront Domain Concerns

pub mod carts;
pub mod coupons;
pub mod inventory;
pub mod orders;
pub mod products;
pub mod shipping;
pub mod users;
