//! Order Invoice Handler

use std::sync::Arc;

use salvo::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    oapi::extract::PathParam,
    prelude::*,
};
use uuid::Uuid;

use souq_app::notifications::invoice_filename;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Order Invoice Handler
///
/// Streams the order's invoice as a PDF attachment.
#[endpoint(
    tags("orders"),
    summary = "Download Invoice",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "PDF invoice"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.invoice",
    skip(order, depot, res),
    fields(order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let order = order.into_inner();

    tracing::Span::current().record("order_uuid", tracing::field::display(order));

    let order = state
        .app
        .orders
        .get_order(order.into(), principal)
        .await
        .map_err(into_status_error)?;

    let pdf = state
        .app
        .invoices
        .render(&order)
        .or_500("failed to render invoice")?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        invoice_filename(&order.invoice_number)
    );

    res.add_header(CONTENT_TYPE, PDF_CONTENT_TYPE, true)
        .or_500("failed to set content type header")?
        .add_header(CONTENT_DISPOSITION, disposition, true)
        .or_500("failed to set content disposition header")?
        .write_body(pdf)
        .or_500("failed to write invoice body")?;

    Ok(StatusCode::OK)
}
