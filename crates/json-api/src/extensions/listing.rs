//! Listing query extraction.

use salvo::prelude::{Request, StatusError};
use storefront::listing::{ListingParams, ListingQuery, ListingSpec};

pub(crate) trait ListingExt {
    /// Shape the request's query string against a listing spec, rejecting
    /// unknown fields and malformed values with 400.
    fn listing_query_or_400(&self, spec: &ListingSpec) -> Result<ListingQuery, StatusError>;
}

impl ListingExt for Request {
    fn listing_query_or_400(&self, spec: &ListingSpec) -> Result<ListingQuery, StatusError> {
        let params: ListingParams = self.queries().iter().collect();

        ListingQuery::shape(spec, &params)
            .map_err(|error| StatusError::bad_request().brief(error.to_string()))
    }
}
