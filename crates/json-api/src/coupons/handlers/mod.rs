//! Coupon Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

use jiff::Timestamp;
use salvo::http::StatusError;
use storefront::coupons::DiscountPercent;

use crate::extensions::*;

fn parse_discount(discount: i64) -> Result<DiscountPercent, StatusError> {
    DiscountPercent::try_from(discount).or_400("invalid discount")
}

fn parse_expiry(expires_at: &str) -> Result<Timestamp, StatusError> {
    expires_at.parse::<Timestamp>().or_400("invalid expires_at")
}
