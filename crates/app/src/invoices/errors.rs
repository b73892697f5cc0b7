//! Invoice errors.

use thiserror::Error;

use crate::domain::pricing::PricingError;

#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("invoice amount overflow")]
    Pricing(#[from] PricingError),

    #[error("failed to build PDF")]
    Pdf(#[from] lopdf::Error),

    #[error("failed to write PDF")]
    Io(#[from] std::io::Error),
}
