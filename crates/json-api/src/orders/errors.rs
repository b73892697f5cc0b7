//! Errors

use salvo::http::StatusError;
use tracing::error;

use souq_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::MissingAddressLine => {
            StatusError::bad_request().brief("Shipping address needs an address line")
        }
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        OrdersServiceError::InvalidData => StatusError::bad_request().brief("Invalid order data"),
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::CustomerNotFound => {
            StatusError::not_found().brief("Customer profile not found")
        }
        OrdersServiceError::Forbidden => {
            StatusError::forbidden().brief("Not allowed to access this order")
        }
        error @ OrdersServiceError::InvalidTransition { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        error @ (OrdersServiceError::InvoiceNumberTaken
        | OrdersServiceError::InvoiceNumbersExhausted { .. }) => {
            error!("failed to allocate invoice number: {error}");

            StatusError::internal_server_error().brief("Could not place order, please retry")
        }
        OrdersServiceError::Pricing(source) => {
            tracing::debug!("rejected order totals: {source}");

            StatusError::bad_request().brief("Order amounts are too large")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use souq_app::domain::{orders::OrderStatus, pricing::PricingError};

    use super::*;

    #[test]
    fn rejected_transitions_are_conflicts() {
        let status = into_status_error(OrdersServiceError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Pending,
        });

        assert_eq!(status.code, StatusCode::CONFLICT);
        assert_eq!(status.brief, "cannot move order from delivered to pending");
    }

    #[test]
    fn exhausted_invoice_numbers_are_internal_errors() {
        assert_eq!(
            into_status_error(OrdersServiceError::InvoiceNumbersExhausted { attempts: 5 }).code,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn caller_mistakes_are_client_errors() {
        for (error, code) in [
            (OrdersServiceError::EmptyCart, StatusCode::BAD_REQUEST),
            (OrdersServiceError::MissingAddressLine, StatusCode::BAD_REQUEST),
            (OrdersServiceError::NotFound, StatusCode::NOT_FOUND),
            (OrdersServiceError::Forbidden, StatusCode::FORBIDDEN),
            (
                OrdersServiceError::Pricing(PricingError::Overflow),
                StatusCode::BAD_REQUEST,
            ),
        ] {
            assert_eq!(into_status_error(error).code, code);
        }
    }
}
