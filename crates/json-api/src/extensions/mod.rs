//! Extension traits

mod depot;
mod listing;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use listing::ListingExt as _;
pub(crate) use result::ResultExt as _;
