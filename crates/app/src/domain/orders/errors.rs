//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError as _, ErrorKind},
};
use thiserror::Error;

use crate::domain::{orders::status::OrderStatus, pricing::PricingError};

const INVOICE_NUMBER_CONSTRAINT: &str = "orders_invoice_number_key";

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("shipping address needs a primary address line")]
    MissingAddressLine,

    #[error("cart is empty")]
    EmptyCart,

    #[error("order not found")]
    NotFound,

    #[error("customer profile not found")]
    CustomerNotFound,

    #[error("order belongs to another user")]
    Forbidden,

    #[error("cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("invoice number already taken")]
    InvoiceNumberTaken,

    #[error("no free invoice number after {attempts} attempts")]
    InvoiceNumbersExhausted { attempts: u32 },

    #[error("invalid order data")]
    InvalidData,

    #[error("invalid order amount")]
    Pricing(#[from] PricingError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let Some((kind, constraint)) = error
            .as_database_error()
            .map(|e| (e.kind(), e.constraint().map(ToString::to_string)))
        else {
            return Self::Sql(error);
        };

        match kind {
            ErrorKind::UniqueViolation
                if constraint.as_deref() == Some(INVOICE_NUMBER_CONSTRAINT) =>
            {
                Self::InvoiceNumberTaken
            }
            ErrorKind::CheckViolation | ErrorKind::NotNullViolation => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
