//! Pricing
//!
//! Money is held as `u64` minor units (cents) throughout.

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use thiserror::Error;

/// Errors from money arithmetic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// An amount overflowed `u64` minor units.
    #[error("amount overflowed")]
    Overflow,

    /// A price change would make a total negative.
    #[error("amount would become negative")]
    Underflow,

    /// A percentage outside `0..=100` was supplied.
    #[error("percentage {0} is outside 0..=100")]
    InvalidPercentage(u16),
}

/// A priced line: a quantity of something at a unit price.
pub trait PricedLine {
    /// Number of units.
    fn quantity(&self) -> u32;

    /// Price of one unit in minor units.
    fn unit_price(&self) -> u64;
}

impl PricedLine for (u32, u64) {
    fn quantity(&self) -> u32 {
        self.0
    }

    fn unit_price(&self) -> u64 {
        self.1
    }
}

/// Sum of `quantity × unit_price` over all lines.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the total does not fit.
pub fn subtotal<L: PricedLine>(lines: &[L]) -> Result<u64, PricingError> {
    lines.iter().try_fold(0_u64, |total, line| {
        u64::from(line.quantity())
            .checked_mul(line.unit_price())
            .and_then(|line_total| total.checked_add(line_total))
            .ok_or(PricingError::Overflow)
    })
}

/// Apply a percentage discount, rounding half away from zero to whole minor
/// units.
///
/// # Errors
///
/// Returns [`PricingError::InvalidPercentage`] when `percent > 100`.
pub fn apply_discount(total: u64, percent: u16) -> Result<u64, PricingError> {
    if percent > 100 {
        return Err(PricingError::InvalidPercentage(percent));
    }

    let Some(total_dec) = Decimal::from_u64(total) else {
        return Err(PricingError::Overflow);
    };

    let remaining = Decimal::from(100 - percent) / Decimal::ONE_HUNDRED;

    let Some(applied) = total_dec.checked_mul(remaining) else {
        return Err(PricingError::Overflow);
    };

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(PricingError::Overflow)
}

/// The money breakdown of an order at checkout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderTotals {
    /// Sum of the catalog prices of every line.
    pub subtotal: u64,

    /// Coupon-discounted subtotal carried over from a cart, if any.
    pub discounted_subtotal: Option<u64>,

    /// Shipping charged on the order.
    pub shipping_price: u64,

    /// Grand total.
    pub total_order_price: u64,
}

impl OrderTotals {
    /// Compute totals. The discounted subtotal, when present, replaces the
    /// subtotal in the grand total.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the grand total does not fit.
    pub fn compute(
        subtotal: u64,
        discounted_subtotal: Option<u64>,
        shipping_price: u64,
    ) -> Result<Self, PricingError> {
        let total_order_price = discounted_subtotal
            .unwrap_or(subtotal)
            .checked_add(shipping_price)
            .ok_or(PricingError::Overflow)?;

        Ok(Self {
            subtotal,
            discounted_subtotal,
            shipping_price,
            total_order_price,
        })
    }
}

/// Replace an order's shipping price, shifting its total by the difference.
///
/// # Errors
///
/// Returns [`PricingError::Underflow`] if the stored total is smaller than the
/// shipping it claims to include, or [`PricingError::Overflow`] if the new
/// total does not fit.
pub fn reprice_shipping(
    total_order_price: u64,
    current_shipping: u64,
    new_shipping: u64,
) -> Result<u64, PricingError> {
    total_order_price
        .checked_sub(current_shipping)
        .ok_or(PricingError::Underflow)?
        .checked_add(new_shipping)
        .ok_or(PricingError::Overflow)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn subtotal_sums_lines() -> TestResult {
        assert_eq!(subtotal(&[(2_u32, 500_u64), (1, 1_250)])?, 2_250);
        assert_eq!(subtotal::<(u32, u64)>(&[])?, 0);

        Ok(())
    }

    #[test]
    fn subtotal_overflow_is_reported() {
        assert_eq!(subtotal(&[(2_u32, u64::MAX)]), Err(PricingError::Overflow));
    }

    #[test]
    fn discount_rounds_half_away_from_zero() -> TestResult {
        // 15% off 1_010 is 858.5
        assert_eq!(apply_discount(1_010, 15)?, 859);
        assert_eq!(apply_discount(1_000, 10)?, 900);
        assert_eq!(apply_discount(1_000, 0)?, 1_000);
        assert_eq!(apply_discount(1_000, 100)?, 0);

        Ok(())
    }

    #[test]
    fn discount_over_one_hundred_is_rejected() {
        assert_eq!(
            apply_discount(1_000, 101),
            Err(PricingError::InvalidPercentage(101))
        );
    }

    #[test]
    fn totals_prefer_discounted_subtotal() -> TestResult {
        let totals = OrderTotals::compute(1_000, Some(900), 150)?;

        assert_eq!(totals.total_order_price, 1_050);

        let totals = OrderTotals::compute(1_000, None, 150)?;

        assert_eq!(totals.total_order_price, 1_150);

        Ok(())
    }

    #[test]
    fn shipping_change_shifts_total_by_delta() -> TestResult {
        assert_eq!(reprice_shipping(100, 10, 15)?, 105);
        assert_eq!(reprice_shipping(100, 10, 0)?, 90);

        Ok(())
    }

    #[test]
    fn shipping_change_cannot_underflow() {
        assert_eq!(reprice_shipping(5, 10, 0), Err(PricingError::Underflow));
    }
}
