//! Coupons Data

use jiff::Timestamp;
use storefront::coupons::DiscountPercent;

use crate::domain::coupons::records::CouponUuid;

/// New Coupon Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCoupon {
    pub uuid: CouponUuid,
    pub name: String,
    pub discount: DiscountPercent,
    pub expires_at: Timestamp,
}

/// Coupon Update Data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CouponUpdate {
    pub name: Option<String>,
    pub discount: Option<DiscountPercent>,
    pub expires_at: Option<Timestamp>,
}
