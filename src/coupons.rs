//! Coupons

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::{PricingError, apply_discount};

/// Percentage outside `0..=100`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("discount must be between 0 and 100, got {0}")]
pub struct InvalidDiscount(pub i64);

/// A whole-number percentage discount in `0..=100`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct DiscountPercent(u16);

impl DiscountPercent {
    /// The percentage.
    pub fn value(self) -> u16 {
        self.0
    }

    /// Apply the discount to a total in minor units.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the arithmetic does not fit.
    pub fn apply(self, total: u64) -> Result<u64, PricingError> {
        apply_discount(total, self.0)
    }
}

impl TryFrom<i64> for DiscountPercent {
    type Error = InvalidDiscount;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .ok()
            .filter(|percent| *percent <= 100)
            .map(Self)
            .ok_or(InvalidDiscount(value))
    }
}

impl From<DiscountPercent> for i64 {
    fn from(value: DiscountPercent) -> Self {
        i64::from(value.0)
    }
}

/// Whether a coupon expiring at `expires_at` may be applied at `now`.
pub fn is_redeemable(expires_at: Timestamp, now: Timestamp) -> bool {
    expires_at > now
}
