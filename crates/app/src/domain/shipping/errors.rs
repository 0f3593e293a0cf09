//! Shipping service errors.

use std::num::TryFromIntError;

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShippingServiceError {
    #[error("shipping price must not be negative")]
    InvalidPrice(#[from] TryFromIntError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ShippingServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
