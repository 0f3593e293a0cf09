//! Carts

use jiff::{SignedDuration, Timestamp};

use crate::pricing::{PricedLine, PricingError, subtotal};

/// Carts untouched for longer than this are purged.
pub const ABANDONED_CART_RETENTION: SignedDuration = SignedDuration::from_hours(7 * 24);

/// Quantity used when an item is added without one.
pub const DEFAULT_ITEM_QUANTITY: u32 = 1;

/// Carts created before the returned instant count as abandoned at `now`.
///
/// # Errors
///
/// Returns an error if the cutoff falls outside the supported time range.
pub fn abandoned_cutoff(now: Timestamp) -> Result<Timestamp, jiff::Error> {
    now.checked_sub(ABANDONED_CART_RETENTION)
}

/// Cart total from the prices captured when each item was added.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the total does not fit.
pub fn cart_total<L: PricedLine>(items: &[L]) -> Result<u64, PricingError> {
    subtotal(items)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn cutoff_is_one_week_back() -> TestResult {
        let now: Timestamp = "2026-03-08T00:00:00Z".parse()?;

        assert_eq!(abandoned_cutoff(now)?, "2026-03-01T00:00:00Z".parse()?);

        Ok(())
    }

    #[test]
    fn cart_total_uses_captured_prices() -> TestResult {
        assert_eq!(cart_total(&[(3_u32, 250_u64), (1, 1_000)])?, 1_750);

        Ok(())
    }
}
