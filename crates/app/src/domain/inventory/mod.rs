//! Inventory
//!
//! Stock checks and stock/sold adjustments. These run inside the caller's
//! transaction so checkout can verify, record, and decrement atomically.

pub mod errors;
pub mod records;
mod reconciler;
mod repository;

pub use errors::InventoryError;
pub use reconciler::PgInventoryReconciler;
