//! Checkout Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use souq_app::domain::orders::{
    OrdersServiceError, data::NewCheckout, records::PaymentMethod,
};

use crate::{
    extensions::*,
    observability::{CheckoutOutcome, observe_checkout},
    orders::{
        errors::into_status_error,
        models::{OrderResponse, ShippingAddressBody},
    },
    state::State,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutRequest {
    /// `cod`, `bank` or `tap`
    pub payment_method: String,

    pub shipping_address: ShippingAddressBody,

    #[serde(default)]
    pub notes: Option<String>,
}

/// Checkout Handler
///
/// Turns the caller's cart into an order and empties the cart.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or invalid checkout data"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.checkout",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty,
        invoice_number = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user_uuid));

    let payment_method = request
        .payment_method
        .parse::<PaymentMethod>()
        .or_400("Unknown payment method")?;

    let checkout = NewCheckout {
        payment_method,
        shipping_address: request.shipping_address.into(),
        notes: request.notes.filter(|notes| !notes.trim().is_empty()),
    };

    let order = match state.app.orders.checkout(principal.user_uuid, checkout).await {
        Ok(order) => order,
        Err(error) => {
            observe_checkout(payment_method.as_str(), checkout_outcome(&error));

            return Err(into_status_error(error));
        }
    };

    observe_checkout(payment_method.as_str(), CheckoutOutcome::Placed);

    span.record("order_uuid", tracing::field::display(order.uuid));
    span.record("invoice_number", order.invoice_number.as_str());

    tracing::info!(total = order.total, "order placed");

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(OrderResponse::try_from(order).or_500("failed to price order")?))
}

fn checkout_outcome(error: &OrdersServiceError) -> CheckoutOutcome {
    match error {
        OrdersServiceError::EmptyCart
        | OrdersServiceError::MissingAddressLine
        | OrdersServiceError::InvalidData
        | OrdersServiceError::CustomerNotFound => CheckoutOutcome::Rejected,
        _ => CheckoutOutcome::Failed,
    }
}
