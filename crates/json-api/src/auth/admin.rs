//! Admin role guard.

use salvo::prelude::*;

use crate::extensions::*;

/// Reject callers without the admin role. Runs after the auth middleware.
#[handler]
pub(crate) async fn require_admin(depot: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
    match depot.current_user_or_401() {
        Ok(requester) if requester.role.is_admin() => {}
        Ok(_requester) => {
            res.render(StatusError::forbidden().brief("Admin role required"));
            ctrl.skip_rest();
        }
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();
        }
    }
}
