//! Shipping Price Registry

pub mod errors;
pub(crate) mod repository;
pub mod service;

pub use errors::ShippingServiceError;
pub use service::*;
