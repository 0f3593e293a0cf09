//! Coupon Records

use jiff::Timestamp;
use storefront::{
    coupons::DiscountPercent,
    listing::{FieldKind, FieldSpec, ListingSpec},
};

use crate::uuids::TypedUuid;

/// Coupon UUID
pub type CouponUuid = TypedUuid<CouponRecord>;

/// Fields a coupon listing may filter, sort, or project on.
pub const COUPONS_LISTING: ListingSpec = ListingSpec::new(
    &[
        FieldSpec::new("uuid", "uuid", FieldKind::Uuid),
        FieldSpec::new("name", "name", FieldKind::Text),
        FieldSpec::new("discount", "discount", FieldKind::Integer),
        FieldSpec::new("expires_at", "expires_at", FieldKind::Timestamp),
        FieldSpec::new("created_at", "created_at", FieldKind::Timestamp),
        FieldSpec::new("updated_at", "updated_at", FieldKind::Timestamp),
    ],
    &["name"],
);

/// Coupon Record
#[derive(Debug, Clone)]
pub struct CouponRecord {
    pub uuid: CouponUuid,
    pub name: String,
    pub discount: DiscountPercent,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
