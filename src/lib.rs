//! Storefront
//!
//! Pure domain rules for the storefront backend: listing query shaping, money
//! arithmetic, stock availability and the order lifecycle policies. Nothing in
//! this crate performs I/O.

pub mod carts;
pub mod coupons;
pub mod listing;
pub mod orders;
pub mod pricing;
pub mod stock;
pub mod users;
