//! Stock
//!
//! Checkout demand is aggregated per product and checked against the stock
//! levels read under lock, before anything is written.

use std::collections::BTreeMap;

use thiserror::Error;
use uuid::Uuid;

/// Errors from stock checks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StockError {
    /// A demanded product does not exist or has been deleted.
    #[error("product {0} not found")]
    ProductNotFound(Uuid),

    /// A product has fewer units available than requested.
    #[error("insufficient stock for \"{title}\": {available} available, {requested} requested")]
    InsufficientStock {
        /// Product UUID.
        product: Uuid,

        /// Product title, for the caller's error message.
        title: String,

        /// Units on hand.
        available: u64,

        /// Units demanded across every line for this product.
        requested: u64,
    },
}

/// Total units demanded of one product.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StockDemand {
    /// Product UUID.
    pub product: Uuid,

    /// Units demanded.
    pub quantity: u64,
}

/// Units on hand for one product.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StockLevel<'a> {
    /// Product UUID.
    pub product: Uuid,

    /// Product title.
    pub title: &'a str,

    /// Units on hand.
    pub available: u64,
}

/// Merge order lines into one demand per product, ordered by product UUID.
///
/// The ordering matches the lock order used when reading stock, so concurrent
/// checkouts over overlapping products acquire row locks consistently.
pub fn aggregate_demand<I>(lines: I) -> Vec<StockDemand>
where
    I: IntoIterator<Item = (Uuid, u32)>,
{
    let mut merged: BTreeMap<Uuid, u64> = BTreeMap::new();

    for (product, quantity) in lines {
        let entry = merged.entry(product).or_default();
        *entry = entry.saturating_add(u64::from(quantity));
    }

    merged
        .into_iter()
        .map(|(product, quantity)| StockDemand { product, quantity })
        .collect()
}

/// Check every demand against the stock levels.
///
/// # Errors
///
/// Returns the first [`StockError`] encountered, in demand order.
pub fn check_availability(
    demand: &[StockDemand],
    levels: &[StockLevel<'_>],
) -> Result<(), StockError> {
    for wanted in demand {
        let level = levels
            .iter()
            .find(|level| level.product == wanted.product)
            .ok_or(StockError::ProductNotFound(wanted.product))?;

        if level.available < wanted.quantity {
            return Err(StockError::InsufficientStock {
                product: wanted.product,
                title: level.title.to_string(),
                available: level.available,
                requested: wanted.quantity,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn duplicate_lines_are_merged_and_sorted() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);

        let demand = aggregate_demand([(b, 1), (a, 2), (b, 3)]);

        assert_eq!(
            demand,
            vec![
                StockDemand {
                    product: a,
                    quantity: 2,
                },
                StockDemand {
                    product: b,
                    quantity: 4,
                },
            ]
        );
    }

    #[test]
    fn exact_stock_is_sufficient() -> TestResult {
        let product = Uuid::from_u128(7);

        check_availability(
            &[StockDemand {
                product,
                quantity: 3,
            }],
            &[StockLevel {
                product,
                title: "Lamp",
                available: 3,
            }],
        )?;

        Ok(())
    }

    #[test]
    fn shortfall_names_the_product() {
        let product = Uuid::from_u128(7);

        let result = check_availability(
            &[StockDemand {
                product,
                quantity: 4,
            }],
            &[StockLevel {
                product,
                title: "Lamp",
                available: 3,
            }],
        );

        assert_eq!(
            result,
            Err(StockError::InsufficientStock {
                product,
                title: "Lamp".to_string(),
                available: 3,
                requested: 4,
            })
        );
    }

    #[test]
    fn missing_level_is_not_found() {
        let product = Uuid::from_u128(9);

        assert_eq!(
            check_availability(
                &[StockDemand {
                    product,
                    quantity: 1,
                }],
                &[],
            ),
            Err(StockError::ProductNotFound(product))
        );
    }
}
