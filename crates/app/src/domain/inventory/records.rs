//! Inventory Records

use storefront::stock::StockLevel;

use crate::domain::products::records::ProductUuid;

/// A locked product row as seen by checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockRecord {
    pub uuid: ProductUuid,
    pub title: String,
    pub price: u64,
    pub quantity: u64,
}

impl StockRecord {
    #[must_use]
    pub fn level(&self) -> StockLevel<'_> {
        StockLevel {
            product: self.uuid.into_uuid(),
            title: &self.title,
            available: self.quantity,
        }
    }
}
