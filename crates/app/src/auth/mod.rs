//! Authentication

mod errors;
mod repository;
mod service;
pub mod token;

pub use errors::*;
pub use service::*;
