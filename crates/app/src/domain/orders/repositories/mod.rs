//! Order Repositories

mod items;
mod orders;

pub(crate) use items::{NewOrderItem, PgOrderItemsRepository};
pub(crate) use orders::{NewOrder, PgOrdersRepository};
