//! Cart Data

use storefront::carts::DEFAULT_ITEM_QUANTITY;

use crate::domain::products::records::ProductUuid;

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub color: Option<String>,
    pub quantity: u32,
}

impl NewCartItem {
    /// A single unit of the product with no color.
    #[must_use]
    pub fn single(product_uuid: ProductUuid) -> Self {
        Self {
            product_uuid,
            color: None,
            quantity: DEFAULT_ITEM_QUANTITY,
        }
    }
}
