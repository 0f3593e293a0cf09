//! Shipping Price Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::shipping::ShippingServiceError;

pub(crate) fn into_status_error(error: ShippingServiceError) -> StatusError {
    match error {
        ShippingServiceError::InvalidPrice(_) => {
            StatusError::bad_request().brief("Shipping price must not be negative")
        }
        ShippingServiceError::Sql(source) => {
            error!("shipping price storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
