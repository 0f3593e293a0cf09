//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use storefront::users::Requester;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the authenticated caller for downstream handlers.
    fn insert_current_user(&mut self, requester: Requester);

    /// The authenticated caller, or 401 when the auth middleware did not run.
    fn current_user_or_401(&self) -> Result<Requester, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_current_user(&mut self, requester: Requester) {
        self.inject(requester);
    }

    fn current_user_or_401(&self) -> Result<Requester, StatusError> {
        self.obtain::<Requester>()
            .copied()
            .map_err(|_missing| StatusError::unauthorized())
    }
}
