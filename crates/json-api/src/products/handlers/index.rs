//! Product Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use storefront_app::domain::products::records::PRODUCTS_LISTING;

use crate::{
    envelope::ListingEnvelope,
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Product Index Handler
///
/// Lists live products. Accepts `page`, `limit`, `sort`, `fields`, `keyword`
/// (matched against title and description) and field filters such as
/// `price[lte]=5000`.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ListingEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let listing = req.listing_query_or_400(&PRODUCTS_LISTING)?;

    let products = state
        .app
        .products
        .list_products(listing.clone())
        .await
        .map_err(into_status_error)?;

    ListingEnvelope::from_page(products.map(ProductResponse::from), &listing)
}
