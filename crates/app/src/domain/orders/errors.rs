//! Orders service errors.

use std::num::TryFromIntError;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use storefront::{pricing::PricingError, stock::StockError};
use thiserror::Error;

use crate::domain::inventory::InventoryError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("cart not found")]
    CartNotFound,

    #[error("order has no items")]
    EmptyOrder,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error(transparent)]
    Stock(#[from] StockError),

    #[error("not allowed to access this order")]
    Forbidden,

    #[error("orders can only be deleted within one hour of being placed")]
    DeletionWindowElapsed,

    #[error("shipping price must not be negative")]
    InvalidPrice(#[from] TryFromIntError),

    #[error("order total could not be computed")]
    Pricing(#[from] PricingError),

    /// Stock could not be decremented for every product after the order was
    /// written. The checkout transaction was rolled back.
    #[error("stock reconciliation applied {applied} of {expected} product deltas")]
    StockReconciliation { expected: usize, applied: usize },

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<InventoryError> for OrdersServiceError {
    fn from(error: InventoryError) -> Self {
        match error {
            InventoryError::Stock(error) => Self::Stock(error),
            InventoryError::Reconciliation { expected, applied } => {
                Self::StockReconciliation { expected, applied }
            }
            InventoryError::Sql(error) => Self::from(error),
        }
    }
}
