//! Product Records

use jiff::Timestamp;
use storefront::listing::{FieldKind, FieldSpec, ListingSpec};

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Fields a product listing may filter, sort, or project on. Keyword search
/// matches the title or the description.
pub const PRODUCTS_LISTING: ListingSpec = ListingSpec::new(
    &[
        FieldSpec::new("uuid", "uuid", FieldKind::Uuid),
        FieldSpec::new("title", "title", FieldKind::Text),
        FieldSpec::new("description", "description", FieldKind::Text),
        FieldSpec::new("price", "price", FieldKind::Integer),
        FieldSpec::new("quantity", "quantity", FieldKind::Integer),
        FieldSpec::new("sold", "sold", FieldKind::Integer),
        FieldSpec::new("created_at", "created_at", FieldKind::Timestamp),
        FieldSpec::new("updated_at", "updated_at", FieldKind::Timestamp),
    ],
    &["title", "description"],
);

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub title: String,
    pub description: String,
    pub price: u64,
    pub quantity: u64,
    pub sold: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
