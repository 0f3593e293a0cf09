//! Inventory errors.

use storefront::stock::StockError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error(transparent)]
    Stock(#[from] StockError),

    /// The conditional decrement touched fewer products than were demanded.
    #[error("stock reconciliation applied {applied} of {expected} product deltas")]
    Reconciliation { expected: usize, applied: usize },

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
