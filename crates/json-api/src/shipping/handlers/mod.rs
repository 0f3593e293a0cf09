//! Shipping Price Handlers

pub(crate) mod get;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Shipping Price Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingPriceResponse {
    /// Applied to new orders unless overridden, in minor units
    pub shipping_price: u64,
}
