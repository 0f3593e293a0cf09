//! Order Errors

use salvo::http::StatusError;
use storefront::stock::StockError;
use tracing::error;

use storefront_app::{domain::orders::OrdersServiceError, uploads::UploadError};

use crate::observability::metrics;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::CartNotFound => StatusError::not_found().brief("Cart not found"),
        OrdersServiceError::EmptyOrder => {
            StatusError::bad_request().brief("Order must contain at least one item")
        }
        OrdersServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be at least 1")
        }
        OrdersServiceError::Stock(source @ StockError::ProductNotFound(_)) => {
            StatusError::not_found().brief(source.to_string())
        }
        OrdersServiceError::Stock(source @ StockError::InsufficientStock { .. }) => {
            StatusError::bad_request().brief(source.to_string())
        }
        OrdersServiceError::Forbidden => {
            StatusError::forbidden().brief("Not allowed to access this order")
        }
        OrdersServiceError::DeletionWindowElapsed => StatusError::bad_request()
            .brief("Orders can only be deleted within one hour of being placed"),
        OrdersServiceError::InvalidPrice(_) => {
            StatusError::bad_request().brief("Shipping price must not be negative")
        }
        OrdersServiceError::Pricing(source) => {
            StatusError::bad_request().brief(format!("Order total out of range: {source}"))
        }
        OrdersServiceError::InvalidReference | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::StockReconciliation { expected, applied } => {
            metrics::record_stock_reconciliation_failure();

            error!(expected, applied, "checkout rolled back: stock reconciliation failed");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn upload_status_error(error: UploadError) -> StatusError {
    match error {
        UploadError::InvalidEncoding(_) | UploadError::UnsupportedFormat => {
            StatusError::bad_request().brief(format!("Invalid payment proof: {error}"))
        }
        UploadError::InvalidFolder | UploadError::UnknownUrl | UploadError::Io(_) => {
            error!("failed to store payment proof: {error}");

            StatusError::internal_server_error()
        }
    }
}
