//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use souq_app::domain::orders::{OrderStatus, data::StatusUpdate};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Update Order Status Request
///
/// An omitted or blank status keeps the current one and only records the note.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub note: Option<String>,
}

impl UpdateOrderStatusRequest {
    fn into_update(self) -> Result<StatusUpdate, StatusError> {
        let status = self
            .status
            .as_deref()
            .map(str::trim)
            .filter(|status| !status.is_empty())
            .map(str::parse::<OrderStatus>)
            .transpose()
            .or_400("Unknown order status")?;

        Ok(StatusUpdate {
            status,
            note: self.note.filter(|note| !note.trim().is_empty()),
        })
    }
}

/// Update Order Status Handler
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated and recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller is not an admin"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(order, json, depot),
    fields(
        order_uuid = tracing::field::Empty,
        status = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let order = order.into_inner();
    let update = json.into_inner().into_update()?;

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order));

    if let Some(status) = update.status {
        span.record("status", status.as_str());
    }

    let order = state
        .app
        .orders
        .update_status(order.into(), principal, update)
        .await
        .map_err(into_status_error)?;

    tracing::info!(status = %order.status, "order status recorded");

    Ok(Json(OrderResponse::try_from(order).or_500("failed to price order")?))
}
