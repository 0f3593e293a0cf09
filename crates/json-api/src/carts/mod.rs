//! Carts
//!
//! Every route acts on the current user's single cart.

mod errors;
mod handlers;
pub(crate) mod items;

pub(crate) use handlers::*;
