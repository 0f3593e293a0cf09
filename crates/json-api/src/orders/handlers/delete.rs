//! Delete Order Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Delete Order Handler
///
/// Owners may delete their order within one hour of it being placed; admins
/// may delete any order at any time. Stock is not restored.
#[endpoint(
    tags("orders"),
    summary = "Delete Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Order deleted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Owner's deletion window elapsed"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.current_user_or_401()?;

    let order = order.into_inner();

    state
        .app
        .orders
        .delete_order(order.into(), requester, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    info!(order_uuid = %order, requester_uuid = %requester.user, "order deleted");

    Ok(StatusCode::NO_CONTENT)
}
